use chrono::{Local, TimeZone};
use std::fmt;

use crate::common::GuestMessage;

use super::escape::escape_html;

pub const EMPTY_PLACEHOLDER: &str = "Belum ada ucapan.";

/// Rendered guestbook section: the count label and the list markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestbookView {
    pub meta: String,
    pub html: String,
}

/// Two-digit zero padding; wider numbers are left alone.
pub fn pad2(value: i64) -> String {
    format!("{value:02}")
}

/// Count label shown above the list.
pub fn count_label(count: usize) -> String {
    format!("{count} ucapan")
}

/// `DD/MM/YYYY HH:MM` in the given zone. Out-of-range timestamps render empty.
pub fn format_time_in<Tz>(timestamp_ms: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match tz.timestamp_millis_opt(timestamp_ms).single() {
        Some(time) => time.format("%d/%m/%Y %H:%M").to_string(),
        None => String::new(),
    }
}

/// `DD/MM/YYYY HH:MM` in the local time zone.
pub fn format_time(timestamp_ms: i64) -> String {
    format_time_in(timestamp_ms, &Local)
}

/// Render `items` (already in display order) using times in `tz`.
pub fn render_guestbook_in<Tz>(items: &[GuestMessage], tz: &Tz) -> GuestbookView
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let meta = count_label(items.len());

    if items.is_empty() {
        return GuestbookView {
            meta,
            html: format!(
                r#"<div class="muted" style="padding:10px 2px;">{EMPTY_PLACEHOLDER}</div>"#
            ),
        };
    }

    let html = items
        .iter()
        .map(|item| {
            let name = escape_html(&item.name);
            let message = escape_html(&item.message);
            let time = escape_html(&format_time_in(item.timestamp, tz));
            format!(
                r#"
      <div class="gb-item">
        <div class="gb-top">
          <div class="gb-name">{name}</div>
          <div class="gb-time">{time}</div>
        </div>
        <div class="gb-msg">{message}</div>
      </div>
    "#
            )
        })
        .collect::<String>();

    GuestbookView { meta, html }
}

pub fn render_guestbook(items: &[GuestMessage]) -> GuestbookView {
    render_guestbook_in(items, &Local)
}

/// Greeting line for the invited guest, if one was named.
pub fn render_greeting(recipient: Option<&str>) -> String {
    match recipient {
        Some(name) => format!(
            r#"<p id="toLine" style="display:block">Kepada Yth. <span id="toName">{}</span></p>"#,
            escape_html(name)
        ),
        None => r#"<p id="toLine" style="display:none"></p>"#.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn wib() -> FixedOffset {
        FixedOffset::east_opt(7 * 3600).unwrap()
    }

    #[test]
    fn pads_to_two_digits() {
        assert_eq!(pad2(0), "00");
        assert_eq!(pad2(7), "07");
        assert_eq!(pad2(42), "42");
        assert_eq!(pad2(123), "123");
    }

    #[test]
    fn formats_zero_padded_day_first() {
        // 2026-03-05T01:04:00Z
        let ts = 1_772_672_640_000;
        assert_eq!(format_time_in(ts, &Utc), "05/03/2026 01:04");
        assert_eq!(format_time_in(ts, &wib()), "05/03/2026 08:04");
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let view = render_guestbook_in(&[], &Utc);
        assert_eq!(view.meta, "0 ucapan");
        assert!(view.html.contains("Belum ada ucapan."));
    }

    #[test]
    fn renders_one_block_per_message_in_given_order() {
        let items = vec![
            GuestMessage::new("Budi", "Hi", 1_772_672_700_000),
            GuestMessage::new("Ana", "Selamat!", 1_772_672_640_000),
        ];
        let view = render_guestbook_in(&items, &Utc);

        assert_eq!(view.meta, "2 ucapan");
        assert_eq!(view.html.matches(r#"class="gb-item""#).count(), 2);
        let budi = view.html.find("Budi").unwrap();
        let ana = view.html.find("Ana").unwrap();
        assert!(budi < ana);
        assert!(view.html.contains("05/03/2026 01:05"));
    }

    #[test]
    fn script_tags_are_neutralized() {
        let items = vec![GuestMessage::new(
            "<b>Mallory</b>",
            "<script>alert('x')</script>",
            0,
        )];
        let view = render_guestbook_in(&items, &Utc);

        assert!(view.html.contains("&lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt;"));
        assert!(view.html.contains("&lt;b&gt;Mallory&lt;/b&gt;"));
        assert!(!view.html.contains("<script>"));
        assert!(!view.html.contains("<b>"));
    }

    #[test]
    fn greeting_escapes_the_recipient() {
        let html = render_greeting(Some("Tom & \"Jerry\""));
        assert!(html.contains("Tom &amp; &quot;Jerry&quot;"));
        assert!(render_greeting(None).contains("display:none"));
    }
}
