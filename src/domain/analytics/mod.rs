//! Analytics - emotion tallies and the aggregate views built on them.

mod distribution;
mod views;

pub use distribution::{
    ChartSlice, DistributionChart, EmotionCount, EmotionDistribution,
    EMPTY_DISTRIBUTION_MESSAGE,
};
pub use views::{
    rank_triggers, CheckInView, GlobalWrap, PersonalAnalytics, ProfileOverview, TriggerCount,
    RECENT_CHECK_IN_LIMIT, TOP_TRIGGER_LIMIT,
};
