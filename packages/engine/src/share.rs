//! Ready-to-post social-media content for events.

use scs_conecta_district_models::Event;
use scs_conecta_engine_models::ShareContent;

use crate::EngineError;

const WHATSAPP_SHARE_URL: &str = "https://wa.me/?text=";
const TELEGRAM_SHARE_URL: &str = "https://t.me/share/url";

/// Local display format for event dates.
const DATE_FORMAT: &str = "%d/%m/%Y";

struct EventDetails<'a> {
    title: &'a str,
    description: &'a str,
    zone: &'a str,
    date: String,
    time: String,
    link: &'a str,
}

impl EventDetails<'_> {
    fn body(&self) -> String {
        let mut body = String::new();
        if !self.description.is_empty() {
            body.push_str(self.description);
            body.push_str("\n\n");
        }
        body.push_str(&format!(
            "📍 {}\n📅 {}\n⏰ {}\n\n🔗 {}",
            self.zone, self.date, self.time, self.link
        ));
        body
    }
}

/// Builds the Instagram, WhatsApp and Telegram content for `event`.
///
/// `zone_name` is the display name of the event's zone.
///
/// # Errors
///
/// Returns [`EngineError::MissingLink`] when the event has no public link.
pub fn share_content(
    event: &Event,
    zone_name: &str,
    hashtags: &[String],
) -> Result<ShareContent, EngineError> {
    let link = event
        .link
        .as_deref()
        .map(str::trim)
        .filter(|link| !link.is_empty())
        .ok_or_else(|| EngineError::MissingLink {
            event_id: event.id.clone(),
        })?;

    let details = EventDetails {
        title: &event.title,
        description: event.description.trim(),
        zone: zone_name,
        date: event.date.format(DATE_FORMAT).to_string(),
        time: event.start_time.to_string(),
        link,
    };
    let body = details.body();

    let mut instagram_caption = format!("🎉 {}\n\n{body}", details.title);
    if !hashtags.is_empty() {
        instagram_caption.push_str("\n\n");
        instagram_caption.push_str(&hashtags.join(" "));
    }

    let instagram_story = format!(
        "{}\n\n{} at {}\n\n{}",
        details.title, details.date, details.time, details.zone
    );

    let whatsapp_message = format!("*{}*\n\n{body}", details.title);
    let whatsapp_url = format!(
        "{WHATSAPP_SHARE_URL}{}",
        urlencoding::encode(&whatsapp_message)
    );

    let telegram_message = format!("{}\n\n{body}", details.title);
    let telegram_url = format!(
        "{TELEGRAM_SHARE_URL}?url={}&text={}",
        urlencoding::encode(link),
        urlencoding::encode(&telegram_message)
    );

    Ok(ShareContent {
        event_id: event.id.clone(),
        instagram_caption,
        hashtags: hashtags.to_vec(),
        instagram_story,
        whatsapp_message,
        whatsapp_url,
        telegram_message,
        telegram_url,
    })
}
