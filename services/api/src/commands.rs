use ai_readiness::assessment::{
    assess, select_template, select_template_for_label, NotificationContent, ScoredSubmission,
    Submission,
};
use ai_readiness::error::AppError;
use clap::Args;
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Path to a submission JSON document
    #[arg(long)]
    pub(crate) file: PathBuf,
    /// Also print the notification the submitter would receive
    #[arg(long)]
    pub(crate) show_email: bool,
}

#[derive(Args, Debug)]
pub(crate) struct PreviewArgs {
    /// Tier label (Foundation, Developing, Advanced, AI-Ready); unknown labels use Foundation
    #[arg(long)]
    pub(crate) level: String,
    #[arg(long, default_value = "Ada")]
    pub(crate) name: String,
    #[arg(long, default_value = "Acme")]
    pub(crate) company: String,
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub(crate) score: u8,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let raw = fs::read_to_string(&args.file)?;
    let submission: Submission = serde_json::from_str(&raw)?;
    let scored = assess(submission)?;
    render_score(&scored);

    if args.show_email {
        let content = notification_for(&scored);
        println!("\nSubject: {}\n\n{}", content.subject, content.body);
    }

    Ok(())
}

fn notification_for(scored: &ScoredSubmission) -> NotificationContent {
    let respondent = &scored.submission.respondent;
    select_template(
        scored.level,
        &respondent.name,
        &respondent.company,
        scored.breakdown.score,
    )
}

fn render_score(scored: &ScoredSubmission) {
    let respondent = &scored.submission.respondent;
    let breakdown = &scored.breakdown;

    println!(
        "{} ({}, {}) -> score {} / 100 ({})",
        respondent.company,
        respondent.name,
        respondent.role,
        breakdown.score,
        scored.level.label()
    );
    println!("Breakdown");
    println!("- AI maturity: {}", breakdown.ai_level);
    println!("- Data infrastructure: {}", breakdown.data_infrastructure);
    println!("- Objectives: {}", breakdown.objectives);
    println!("- Timeline: {}", breakdown.timeline);
    println!(
        "- Subtotal {} x {:.1} company size multiplier",
        breakdown.subtotal,
        f64::from(breakdown.multiplier_tenths) / 10.0
    );
}

pub(crate) fn run_preview(args: PreviewArgs) {
    let content = select_template_for_label(&args.level, &args.name, &args.company, args.score);
    println!("Subject: {}\n\n{}", content.subject, content.body);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_submission(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write submission");
        file
    }

    #[test]
    fn score_command_accepts_complete_submission() {
        let file = write_submission(
            r#"{"name":"Ada","email":"ada@x.com","company":"Acme","role":"CTO","industry":"tech",
                "ai_level":"basic","data_infrastructure":"good","objectives":["a","b"],
                "timeline":"short","company_size":"small"}"#,
        );
        run_score(ScoreArgs {
            file: file.path().to_path_buf(),
            show_email: true,
        })
        .expect("scores");
    }

    #[test]
    fn score_command_email_uses_scored_tier() {
        let submission: Submission = serde_json::from_str(
            r#"{"name":"Ada","email":"ada@x.com","company":"Acme","role":"CTO","industry":"tech",
                "ai_level":"basic","data_infrastructure":"good","objectives":["a","b"],
                "timeline":"short","company_size":"small"}"#,
        )
        .expect("submission parses");
        let scored = assess(submission).expect("valid submission");

        let content = notification_for(&scored);
        assert!(content.subject.contains("Advanced"));
        assert!(content.body.contains("68"));
    }

    #[test]
    fn score_command_reports_missing_field() {
        let file = write_submission(r#"{"name":"Ada","company":"Acme"}"#);
        match run_score(ScoreArgs {
            file: file.path().to_path_buf(),
            show_email: false,
        }) {
            Err(AppError::Validation(err)) => assert_eq!(err.field().as_str(), "email"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn score_command_reports_malformed_json() {
        let file = write_submission("not json");
        assert!(matches!(
            run_score(ScoreArgs {
                file: file.path().to_path_buf(),
                show_email: false,
            }),
            Err(AppError::Payload(_))
        ));
    }
}
