use super::config::ReferralConfig;
use super::mailer::EmailMessage;
use super::model::Registrant;
use super::tiers::{next_tier, unlocked_count};

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html><html><body style=\"font-family:sans-serif;background:#0f0518;color:#f4f0ff;padding:24px\">\
<h1 style=\"color:#c4a7ff\">{title}</h1>{body}</body></html>"
    )
}

fn button(href: &str, label: &str) -> String {
    format!(
        "<p><a href=\"{href}\" style=\"display:inline-block;padding:12px 20px;background:#7c3aed;color:#fff;border-radius:8px;text-decoration:none\">{label}</a></p>"
    )
}

pub fn welcome(config: &ReferralConfig, registrant: &Registrant) -> EmailMessage {
    let code = &registrant.referral_code;
    let dashboard = config.dashboard_link(code);
    let share = config.share_link(code);

    let html = layout(
        "You're on the list",
        &format!(
            "<p>Thanks for joining. Your referral code is <strong>{code}</strong>.</p>\
<p>Share this link with friends to move up and unlock rewards:</p>\
<p><code>{share}</code></p>{}",
            button(&dashboard, "Open your dashboard")
        ),
    );
    let text = format!(
        "Thanks for joining. Your referral code is {code}.\n\n\
Share this link with friends to unlock rewards:\n{share}\n\n\
Track your referrals here:\n{dashboard}\n"
    );

    EmailMessage {
        to: registrant.email.clone(),
        subject: "You're on the waitlist".to_string(),
        html,
        text,
    }
}

/// Sent to a referrer after a signup was credited to them.
pub fn referral_credited(config: &ReferralConfig, referrer: &Registrant) -> EmailMessage {
    let count = referrer.referral_count;
    let dashboard = config.dashboard_link(&referrer.referral_code);
    let friends = if count == 1 { "friend has" } else { "friends have" };

    let progress = match next_tier(&config.tiers, count) {
        Some(tier) => {
            let missing = tier.threshold - count;
            format!(
                "{missing} more to unlock {}{}.",
                tier.title,
                if tier.description.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", tier.description)
                }
            )
        }
        None => "You've unlocked every reward. Thank you!".to_string(),
    };
    let unlocked = unlocked_count(&config.tiers, count);

    let html = layout(
        "Someone joined with your link",
        &format!(
            "<p><strong>{count}</strong> {friends} joined so far. Rewards unlocked: {unlocked}.</p>\
<p>{progress}</p>{}",
            button(&dashboard, "See your progress")
        ),
    );
    let text = format!(
        "{count} {friends} joined so far. Rewards unlocked: {unlocked}.\n{progress}\n\n{dashboard}\n"
    );

    EmailMessage {
        to: referrer.email.clone(),
        subject: format!("New referral! You're at {count}"),
        html,
        text,
    }
}
