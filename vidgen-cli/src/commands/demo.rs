//! Demo command
//!
//! Submits the three canned examples up front, then awaits each job in turn.

use anyhow::Result;
use colored::*;
use tokio_util::sync::CancellationToken;
use vidgen_core::domain::request::{GenerationParams, GenerationRequest};

use crate::config::Config;
use crate::reporter::ConsoleReporter;

/// One example per generation mode
pub fn demo_requests() -> Vec<GenerationRequest> {
    vec![
        GenerationRequest::text_to_video(
            "A cat playing with a ball",
            GenerationParams::new(Some(10), Some(42)),
        ),
        GenerationRequest::image_to_video(
            "The dog runs in the park",
            "https://example.com/my-dog.jpg",
            GenerationParams::new(Some(10), Some(123)),
        ),
        GenerationRequest::soul(
            "A young woman and a monkey dancing together in a colorful house",
            [
                "https://example.com/woman-character.png",
                "https://example.com/monkey-character.png",
                "https://example.com/colorful-house.jpg",
            ],
        ),
    ]
}

pub async fn run_demo(config: &Config, cancel: &CancellationToken) -> Result<()> {
    let tracker = config.tracker()?;
    let mut console = ConsoleReporter;

    println!("{}", "Starting video generation examples...".bold());
    println!();
    let submissions = tracker.submit_all(&demo_requests(), &mut console).await;

    println!();
    println!("{}", "=".repeat(60));
    println!("Monitoring generation status...");
    println!("{}", "=".repeat(60));

    let tracked = tracker.await_each(submissions, cancel, &mut console).await;

    println!();
    if cancel.is_cancelled() {
        println!("{}", "Stopped before all generations finished.".yellow());
    } else {
        println!(
            "{}",
            format!("All generations complete! ({} tracked)", tracked.len()).green()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidgen_core::domain::request::GenerationMode;

    #[test]
    fn test_demo_covers_every_mode_with_valid_requests() {
        let requests = demo_requests();
        let modes: Vec<_> = requests.iter().map(GenerationRequest::mode).collect();

        assert_eq!(
            modes,
            vec![
                GenerationMode::TextToVideo,
                GenerationMode::ImageToVideo,
                GenerationMode::Soul
            ]
        );
        assert!(requests.iter().all(|r| r.validate().is_ok()));
    }
}
