//! Placeholder answer prediction for questions with no confident match.
//!
//! Extension point for a real model later; today it returns a fixed prompt
//! asking the user to teach the service the correct answer.

pub fn predict_answer(question: &str) -> &'static str {
    if question.trim().is_empty() {
        return "Please ask a valid question.";
    }

    "I'm not sure about that yet. Could you please provide the correct answer so I can learn?"
}
