//! Plain-text rendering of the view models for the terminal.

use super::contacts::{ContactCard, ContactListView, PageButton};
use super::dashboard::{DashboardView, MapView, RecentContacts};
use super::detail::ContactDetailView;
use super::screen::Screen;

fn card_lines(card: &ContactCard, out: &mut Vec<String>) {
    let star = if card.favorite { " ★" } else { "" };
    out.push(format!("[{}] {} (#{}){star}", card.initials, card.full_name, card.id));
    if let Some(email) = &card.email {
        out.push(format!("    ✉ {email}"));
    }
    if let Some(phone) = &card.phone {
        out.push(format!("    ☎ {phone}"));
    }
    if let Some(address) = &card.address {
        out.push(format!("    ◈ {address}"));
    }
    if !card.tags.is_empty() {
        out.push(format!("    # {}", card.tags.join(", ")));
    }
}

pub fn render_pagination(buttons: &[PageButton]) -> String {
    buttons
        .iter()
        .map(|b| match b {
            PageButton::Previous { disabled: true, .. } => "(←)".to_string(),
            PageButton::Previous { .. } => "←".to_string(),
            PageButton::Page { number, active: true } => format!("[{number}]"),
            PageButton::Page { number, .. } => number.to_string(),
            PageButton::Gap => "...".to_string(),
            PageButton::Next { disabled: true, .. } => "(→)".to_string(),
            PageButton::Next { .. } => "→".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_contact_list(view: &ContactListView) -> String {
    match view {
        ContactListView::Empty { message } => (*message).to_string(),
        ContactListView::Error { message, can_retry } => {
            if *can_retry {
                format!("Failed to load contacts: {message}\nRun the command again to retry.")
            } else {
                format!("Failed to load contacts: {message}")
            }
        }
        ContactListView::Cards {
            cards,
            pagination,
            total_records,
        } => {
            let mut lines = Vec::new();
            for card in cards {
                card_lines(card, &mut lines);
            }
            lines.push(String::new());
            lines.push(format!("{total_records} contact(s)"));
            if !pagination.is_empty() {
                lines.push(render_pagination(pagination));
            }
            lines.join("\n")
        }
    }
}

pub fn render_detail(view: &ContactDetailView) -> String {
    let width = view.rows.iter().map(|r| r.label.chars().count()).max().unwrap_or(0);
    let mut lines = vec![format!("{} (#{})", view.title, view.id)];
    for row in &view.rows {
        lines.push(format!("  {:<width$}  {}", format!("{}:", row.label), row.value, width = width + 1));
    }
    lines.join("\n")
}

pub fn render_dashboard(view: &DashboardView) -> String {
    let stats = &view.stats;
    let mut lines = vec![
        format!("Total contacts:   {}", stats.total),
        format!("Favorites:        {}", stats.favorites),
        format!("With location:    {}", stats.with_location),
        format!("With email:       {}", stats.with_email),
        String::new(),
        "Recently added".to_string(),
    ];
    match &view.recent {
        RecentContacts::Empty { message } => lines.push(format!("  {message}")),
        RecentContacts::Cards(cards) => {
            for card in cards {
                lines.push(format!("  [{}] {}", card.initials, card.full_name));
            }
        }
    }
    lines.join("\n")
}

pub fn render_map(view: &MapView) -> String {
    let mut lines = Vec::new();
    for pin in &view.pins {
        let address = if pin.address.is_empty() {
            String::new()
        } else {
            format!(" {}", pin.address)
        };
        lines.push(format!(
            "#{} {} ({:.5}, {:.5}){address}",
            pin.contact_id, pin.title, pin.latitude, pin.longitude
        ));
    }
    match view.bounds {
        Some(b) => lines.push(format!(
            "bounds: {:.5},{:.5} .. {:.5},{:.5}",
            b.south, b.west, b.north, b.east
        )),
        None => lines.push(format!(
            "no located contacts; centre {:.1}, {:.1}",
            view.center.0, view.center.1
        )),
    }
    lines.join("\n")
}

pub fn render_screen(screen: &Screen) -> String {
    match screen {
        Screen::SignedOut => "Signed out. Run `rehber login` to sign in.".to_string(),
        Screen::SignedIn { username } => format!("Signed in as {username}"),
    }
}
