//! Console implementations of the presentation and audio collaborators.

use services::collab::{
    AudioError, AudioSink, CardView, CompareView, FeedbackKind, Presenter, ToneKind,
};

pub struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn show_pair(&mut self, view: &CompareView) {
        println!();
        println!("[{}]  ({})", view.category, view.position);
        println!("  front nasal: {} ({})", view.front_text, view.front_pinyin);
        println!("  back nasal:  {} ({})", view.back_text, view.back_pinyin);
    }

    fn show_cards(&mut self, cards: &[CardView]) {
        println!();
        println!("cards on the board:");
        for card in cards {
            println!("  #{:<3} {} ({})", card.id, card.text, card.pinyin);
        }
    }

    fn pool_emptied(&mut self) {
        println!("all cards placed!");
    }

    fn show_score(&mut self, score: u32, total: u32) {
        println!("score: {score}/{total}");
    }

    fn show_summary(&mut self, score: u32, total: u32, percentage: u32, passed: bool) {
        let verdict = if passed { "passed" } else { "keep practicing" };
        println!();
        println!("round over: {score}/{total} ({percentage}%) - {verdict}");
    }

    fn feedback(&mut self, kind: FeedbackKind, title: &str, message: &str) {
        let mark = match kind {
            FeedbackKind::Positive => "✓",
            FeedbackKind::Negative => "✗",
        };
        println!("{mark} {title}: {message}");
    }
}

/// Prints what a speech backend would say. The trainer treats audio as
/// best-effort, so this sink never fails.
pub struct ConsoleAudio;

impl AudioSink for ConsoleAudio {
    fn vocalize(&mut self, text: &str) -> Result<(), AudioError> {
        println!("♪ {text}");
        Ok(())
    }

    fn tone(&mut self, kind: ToneKind) -> Result<(), AudioError> {
        match kind {
            ToneKind::Success => println!("(ding)"),
            ToneKind::Failure => println!("(buzz)"),
        }
        Ok(())
    }
}
