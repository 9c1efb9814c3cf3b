// Export components
pub mod contest_listing;
pub mod google_calendar;
pub mod reconciler;

pub use contest_listing::{AtCoderListing, Contest, ContestSource};
pub use google_calendar::{CalendarGateway, GoogleCalendarHandle};
pub use reconciler::Reconciler;
