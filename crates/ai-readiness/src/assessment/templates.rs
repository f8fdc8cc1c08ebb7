use serde::Serialize;

use super::domain::ReadinessLevel;

/// Subject and plain-text body sent to the submitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationContent {
    pub subject: String,
    pub body: String,
}

/// Render the tier-specific notification.
pub fn select_template(
    level: ReadinessLevel,
    name: &str,
    company: &str,
    score: u8,
) -> NotificationContent {
    match level {
        ReadinessLevel::Foundation => foundation(name, company, score),
        ReadinessLevel::Developing => developing(name, company, score),
        ReadinessLevel::Advanced => advanced(name, company, score),
        ReadinessLevel::AiReady => ai_ready(name, company, score),
    }
}

/// Render from a stored or user-supplied tier label; unknown labels get the Foundation template.
pub fn select_template_for_label(
    label: &str,
    name: &str,
    company: &str,
    score: u8,
) -> NotificationContent {
    let level = ReadinessLevel::from_label(label).unwrap_or(ReadinessLevel::Foundation);
    select_template(level, name, company, score)
}

fn foundation(name: &str, company: &str, score: u8) -> NotificationContent {
    NotificationContent {
        subject: format!("{name}, your AI readiness results for {company}: {score}/100 (Foundation)"),
        body: format!(
            "Hi {name},\n\n\
             Thank you for completing the AI readiness assessment for {company}. \
             Your readiness score is {score}/100, which places {company} at the Foundation level.\n\n\
             Organizations at this stage get the most value from groundwork rather than tooling:\n\
             - Inventory the data {company} already collects and where it lives\n\
             - Pick one or two business problems where better decisions would pay off quickly\n\
             - Build basic data literacy with the teams who would own those problems\n\n\
             We will follow up with a short guide on laying an AI foundation. \
             Reply to this email if you would like to talk it through.\n\n\
             Best regards,\n\
             The AI Readiness Team\n"
        ),
    }
}

fn developing(name: &str, company: &str, score: u8) -> NotificationContent {
    NotificationContent {
        subject: format!("{name}, {company} is Developing its AI readiness: {score}/100"),
        body: format!(
            "Hi {name},\n\n\
             Thank you for completing the AI readiness assessment for {company}. \
             Your readiness score is {score}/100, which places {company} at the Developing level.\n\n\
             You have early capabilities in place. Recommended next steps:\n\
             - Consolidate data sources behind a shared, governed platform\n\
             - Run a scoped pilot with clear success metrics\n\
             - Define ownership for models once they reach production\n\n\
             We will send over examples of pilots that worked for teams at a similar stage.\n\n\
             Best regards,\n\
             The AI Readiness Team\n"
        ),
    }
}

fn advanced(name: &str, company: &str, score: u8) -> NotificationContent {
    NotificationContent {
        subject: format!("{name}, {company} scored {score}/100: Advanced AI readiness"),
        body: format!(
            "Hi {name},\n\n\
             Thank you for completing the AI readiness assessment for {company}. \
             Your readiness score is {score}/100, which places {company} at the Advanced level.\n\n\
             With solid data and working AI initiatives, the focus shifts to scale:\n\
             - Standardize deployment and monitoring across teams\n\
             - Prioritize use cases by measurable business impact\n\
             - Put responsible-AI review into the delivery process\n\n\
             Our team would be glad to walk through a scaling roadmap for {company}.\n\n\
             Best regards,\n\
             The AI Readiness Team\n"
        ),
    }
}

fn ai_ready(name: &str, company: &str, score: u8) -> NotificationContent {
    NotificationContent {
        subject: format!("{name}, {company} is AI-Ready with a score of {score}/100"),
        body: format!(
            "Hi {name},\n\n\
             Congratulations! {company} scored {score}/100 on the AI readiness assessment, \
             which places it at the AI-Ready level.\n\n\
             {company} has the data, skills and momentum to treat AI as a core capability:\n\
             - Explore differentiating use cases beyond efficiency gains\n\
             - Invest in platform capabilities shared across business units\n\
             - Measure and publish the value AI delivers\n\n\
             A member of our team will reach out to discuss advanced engagement options.\n\n\
             Best regards,\n\
             The AI Readiness Team\n"
        ),
    }
}
