mod loading;
pub use loading::LoadingView;

mod not_found;
pub use not_found::NotFoundView;

mod landing;
pub use landing::Landing;

mod login;
pub use login::LoginView;

mod registration;
pub use registration::RegistrationView;

mod profile;
pub use profile::ProfileView;

mod opportunities;
pub use opportunities::{OpportunityCard, OpportunityList};

mod opportunity_detail;
pub use opportunity_detail::OpportunityDetail;

mod create_opportunity;
pub use create_opportunity::{publish_opportunity, CreateOpportunityForm};

mod org_profile;
pub use org_profile::OrgProfileView;

mod created_opportunities;
pub use created_opportunities::{created_by, CreatedOpportunitiesView};
