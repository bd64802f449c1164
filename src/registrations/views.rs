use askama_axum::Template;
use time::macros::format_description;

use super::repo_types::Registration;

#[derive(Template)]
#[template(
    source = "<h1>Registration Successful!</h1>\
<p>Thank you for registering. You can go back to the <a href=\"/\">home page</a>.</p>",
    ext = "html"
)]
pub struct RegisteredTemplate {}

pub struct ListedRegistration {
    pub name: String,
    pub email: String,
    pub registered: String,
}

impl From<&Registration> for ListedRegistration {
    fn from(reg: &Registration) -> Self {
        let registered = reg
            .registered_at
            .format(format_description!(
                "[year]-[month]-[day] [hour]:[minute]:[second]"
            ))
            .unwrap_or_else(|_| reg.registered_at.to_string());
        Self {
            name: reg.name.clone(),
            email: reg.email.clone(),
            registered,
        }
    }
}

#[derive(Template)]
#[template(
    source = "<h1>All Registrations</h1><ul>\
{% for reg in rows %}<li>Name: {{ reg.name }}, Email: {{ reg.email }}, Registered: {{ reg.registered }}</li>{% endfor %}\
</ul><p><a href=\"/\">Back to Home</a></p>",
    ext = "html"
)]
pub struct RegistrationsTemplate {
    pub rows: Vec<ListedRegistration>,
}

impl RegistrationsTemplate {
    pub fn new(rows: &[Registration]) -> Self {
        Self {
            rows: rows.iter().map(ListedRegistration::from).collect(),
        }
    }
}
