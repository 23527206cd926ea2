use askama::Template;

use crate::pkg::internal::dashboard::view::{CardsView, DashboardView};

#[derive(Template)]
#[template(path = "admin.html")]
pub struct AdminPage<'a> {
    pub service: &'a str,
    pub view: &'a DashboardView,
}

#[derive(Template)]
#[template(path = "candidates.html")]
pub struct CandidatesPage<'a> {
    pub service: &'a str,
    pub query: &'a str,
    pub view: &'a CardsView,
}
