pub mod export;
pub mod totals;

pub use totals::{
    average_session_minutes, crown, current_streak_days, round_hours, subject_breakdown,
    user_totals, Crown, UserTotals,
};
