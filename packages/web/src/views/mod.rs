use dioxus::prelude::*;
use ui::RedirectTarget;

use crate::Route;

mod layout;
pub use layout::AppLayout;

mod home;
pub use home::Home;

mod account;
pub use account::{Login, OrgRegistration, Registration};

mod profile;
pub use profile::{EditProfile, EditProfileSection, Profile};

mod org_profile;
pub use org_profile::{
    CreatedOpportunities, CreatedOpportunitiesReturn, LegacyCreatedOpportunities, OrgProfile,
};

mod opportunities;
pub use opportunities::{Applicants, NewOpportunity, Opportunities, OpportunityPage};

mod chat;
pub use chat::{Chat, OrgChat};

mod not_found;
pub use not_found::NotFound;

/// Sends a visitor turned away by a route guard to the right page.
pub(crate) fn redirect(nav: Navigator, target: RedirectTarget) {
    match target {
        RedirectTarget::Login => nav.replace(Route::Login {}),
        RedirectTarget::Profile => nav.replace(Route::Profile {}),
    };
}
