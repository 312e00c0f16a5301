use thiserror::Error;

pub mod machine;
pub mod tape;

pub use machine::Machine;
pub use tape::Tape;

#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The cursor would have moved left of cell zero. Fatal, never a silent
    /// wraparound.
    #[error("cursor moved below cell zero")]
    NegativePosition,

    #[error("I/O error")]
    Io(
        #[from]
        std::io::Error,
    ),
}
