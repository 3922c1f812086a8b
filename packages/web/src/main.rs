use dioxus::prelude::*;

use store::AppConfig;
use ui::AppProvider;
use views::{
    AppLayout, Applicants, Chat, CreatedOpportunities, CreatedOpportunitiesReturn, EditProfile,
    EditProfileSection, Home, LegacyCreatedOpportunities, Login, NewOpportunity, NotFound,
    Opportunities, OpportunityPage, OrgChat, OrgProfile, OrgRegistration, Profile, Registration,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(AppLayout)]
        #[route("/")]
        Home {},
        #[route("/chat")]
        Chat {},
        #[route("/org/chat")]
        OrgChat {},
        #[route("/opportunities")]
        Opportunities {},
        #[route("/opportunities/new")]
        NewOpportunity {},
        #[route("/opportunities/:id")]
        OpportunityPage { id: i64 },
        #[route("/opportunities/org/:id/applicants")]
        Applicants { id: i64 },
        #[route("/login")]
        Login {},
        #[route("/profile")]
        Profile {},
        #[route("/registration")]
        Registration {},
        #[route("/registration/org")]
        OrgRegistration {},
        #[route("/edit-profile")]
        EditProfile {},
        #[route("/edit-profile/:..rest")]
        EditProfileSection { rest: Vec<String> },
        #[route("/org-profile")]
        OrgProfile {},
        #[route("/org-profile/CreatedOpportunities/num=1")]
        CreatedOpportunitiesReturn {},
        #[route("/org-profile/createdOpportunities")]
        CreatedOpportunities {},
        #[route("/org-profile/created0pportunities")]
        LegacyCreatedOpportunities {},
        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

impl Route {
    /// Where the profile editor sends the user after a successful save.
    fn after_profile_saved() -> Self {
        Route::Profile {}
    }
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Embedded at build time; edit it to point the front-end at another backend.
const CONFIG_TOML: &str = include_str!("../volunteer-match.toml");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(|| AppConfig::from_toml_or_default(CONFIG_TOML));

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AppProvider {
            config,
            Router::<Route> {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(path: &str) -> Route {
        path.parse::<Route>()
            .unwrap_or_else(|e| panic!("{path} did not parse: {e}"))
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        assert_eq!(
            parse("/does-not-exist"),
            Route::NotFound {
                segments: vec!["does-not-exist".to_string()]
            }
        );
    }

    #[test]
    fn test_opportunity_routes() {
        assert_eq!(parse("/opportunities"), Route::Opportunities {});
        assert_eq!(parse("/opportunities/new"), Route::NewOpportunity {});
        assert_eq!(parse("/opportunities/42"), Route::OpportunityPage { id: 42 });
        assert_eq!(
            parse("/opportunities/org/1/applicants"),
            Route::Applicants { id: 1 }
        );
    }

    #[test]
    fn test_org_profile_routes() {
        assert_eq!(parse("/org-profile"), Route::OrgProfile {});
        assert_eq!(
            parse("/org-profile/createdOpportunities"),
            Route::CreatedOpportunities {}
        );
        assert_eq!(
            parse("/org-profile/created0pportunities"),
            Route::LegacyCreatedOpportunities {}
        );
        assert_eq!(
            parse("/org-profile/CreatedOpportunities/num=1"),
            Route::CreatedOpportunitiesReturn {}
        );
    }

    #[test]
    fn test_edit_profile_accepts_any_suffix() {
        assert_eq!(parse("/edit-profile"), Route::EditProfile {});
        assert!(matches!(
            parse("/edit-profile/org"),
            Route::EditProfileSection { .. }
        ));
    }

    #[test]
    fn test_saved_profile_returns_to_profile_page() {
        assert_eq!(Route::after_profile_saved().to_string(), "/profile");
    }

    #[test]
    fn test_route_paths_render_back() {
        assert_eq!(Route::Applicants { id: 7 }.to_string(), "/opportunities/org/7/applicants");
        assert_eq!(Route::OrgChat {}.to_string(), "/org/chat");
        assert_eq!(Route::OrgRegistration {}.to_string(), "/registration/org");
    }

    #[test]
    fn test_embedded_config_parses() {
        let config = AppConfig::from_toml(CONFIG_TOML).unwrap();
        assert_eq!(config.posts.page_size, 3);
    }
}
