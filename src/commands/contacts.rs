use crate::contacts::{ContactFilters, ContactForm, SortDirection, SortField};
use crate::state::AppState;
use crate::types::Contact;
use crate::view::text::{render_contact_list, render_detail};
use crate::view::{contact_detail, ContactListView};
use clap::Args;

#[derive(Clone, Debug, Default, Args)]
pub struct ListArgs {
    /// Page to show
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Free-text search over name, email, phone and address
    #[arg(long)]
    pub search: Option<String>,

    /// Only contacts with this tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Only favorites
    #[arg(long)]
    pub favorites: bool,

    /// isim, eposta, telefon, created_at or updated_at
    #[arg(long)]
    pub sort: Option<SortField>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,
}

/// Form fields; on `edit` only the given ones change.
#[derive(Clone, Debug, Default, Args)]
pub struct ContactFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub surname: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub phone2: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    /// Comma separated
    #[arg(long)]
    pub tags: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
    #[arg(long)]
    pub favorite: Option<bool>,
}

impl ContactFields {
    fn apply(self, form: &mut ContactForm) {
        let fields = [
            (self.name, &mut form.first_name),
            (self.surname, &mut form.last_name),
            (self.email, &mut form.email),
            (self.phone, &mut form.phone),
            (self.phone2, &mut form.phone_2),
            (self.address, &mut form.address),
            (self.city, &mut form.city),
            (self.country, &mut form.country),
            (self.tags, &mut form.tags),
            (self.notes, &mut form.notes),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if let Some(favorite) = self.favorite {
            form.favorite = favorite;
        }
    }
}

pub(super) async fn list(state: &AppState, args: ListArgs) -> anyhow::Result<String> {
    let filters = ContactFilters {
        search: args.search,
        tag: args.tag,
        favorites_only: args.favorites,
        sort: args.sort.unwrap_or_else(|| state.default_sort()),
        direction: if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        },
    };
    let mut controller = state.contacts_controller();
    let view = controller.load_contacts(filters, args.page).await;
    let text = render_contact_list(&view);
    match view {
        ContactListView::Error { .. } => Err(anyhow::anyhow!(text)),
        _ => Ok(text),
    }
}

pub(super) async fn show(
    state: &AppState,
    id: Option<i64>,
    name: Option<&str>,
) -> anyhow::Result<String> {
    let contact = match (id, name) {
        (Some(id), _) => state.api.contact(id).await?,
        (None, Some(name)) => state.api.find_contact(name).await?,
        (None, None) => anyhow::bail!("give a contact id or --name"),
    };
    Ok(render_detail(&contact_detail(&contact)))
}

fn saved(message: Option<String>, fallback: &str, contact: &Contact) -> String {
    let headline = message.unwrap_or_else(|| fallback.to_string());
    format!("{headline}\n{}", render_detail(&contact_detail(contact)))
}

pub(super) async fn add(state: &AppState, fields: ContactFields) -> anyhow::Result<String> {
    let mut form = ContactForm::default();
    fields.apply(&mut form);
    let draft = form.to_draft()?;
    let res = state.api.create_contact(&draft).await?;
    Ok(saved(res.message, "Contact added", &res.contact))
}

pub(super) async fn edit(state: &AppState, id: i64, fields: ContactFields) -> anyhow::Result<String> {
    let current = state.api.contact(id).await?;
    let mut form = ContactForm::from_contact(&current);
    fields.apply(&mut form);
    let draft = form.to_draft()?;
    let res = state.api.update_contact(id, &draft).await?;
    Ok(saved(res.message, "Contact updated", &res.contact))
}

pub(super) async fn delete(state: &AppState, id: i64) -> anyhow::Result<String> {
    let res = state.api.delete_contact(id).await?;
    Ok(res.message.unwrap_or_else(|| "Contact deleted".to_string()))
}

pub(super) async fn favorite(state: &AppState, id: i64) -> anyhow::Result<String> {
    let res = state.api.toggle_favorite(id).await?;
    let status = if res.favorite {
        "★ marked as favorite"
    } else {
        "removed from favorites"
    };
    Ok(format!("#{id} {status}"))
}
