pub mod question;

pub use question::{Options, Question, QuestionType};
