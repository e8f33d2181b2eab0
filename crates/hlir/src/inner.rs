use logos::Logos;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Logos)]
#[logos(skip r"[^+\-<>.,\[\]]+")]
pub enum InnerOpCode {
	#[token("<")]
	MoveLeft,
	#[token(">")]
	MoveRight,
	#[token("+")]
	Increment,
	#[token("-")]
	Decrement,
	#[token(",")]
	Input,
	#[token(".")]
	Output,
	#[token("[")]
	StartLoop,
	#[token("]")]
	EndLoop,
}
