pub mod content;
pub mod content_id;
pub mod person;
pub mod status;
pub mod tmdb;

pub use content::{
    CastMember, ContentDetails, ContentResponse, CrewMember, Genre, Platform,
    PlatformAvailability, Ratings, RegionalProviders, SearchResponse, SearchResultItem,
    WatchProvider,
};
pub use content_id::{ContentId, ContentIdError, ContentKind};
pub use person::{CombinedCredits, CreditEntry, PersonDetails, PersonResponse};
pub use status::{
    ContentStatusRecord, ResolvedPreferences, StatusKey, StatusPreference, StatusUpdate,
    StatusView, COLOR_PALETTE, ICON_PALETTE,
};
pub use tmdb::{
    TmdbCredits, TmdbDetails, TmdbProvider, TmdbRegionProviders, TmdbSearchItem, TmdbSearchPage,
    TmdbVideo, TmdbVideos, TmdbWatchProviders,
};
