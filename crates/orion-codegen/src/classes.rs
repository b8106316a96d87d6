//! Utility classes baked into exported markup. Both dialects share them so a
//! tree looks the same whichever framework it is exported to.

use orion_core::{AlertTone, BadgeVariant, ButtonVariant};

/// Join class fragments, dropping blanks and collapsing whitespace.
pub fn join(parts: &[&str]) -> String {
    parts
        .iter()
        .flat_map(|part| part.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn button(variant: Option<ButtonVariant>) -> &'static str {
    match variant {
        Some(ButtonVariant::Primary) => "px-4 py-2 rounded-lg bg-blue-600 text-white",
        _ => "px-4 py-2 rounded-lg bg-slate-200 text-slate-800",
    }
}

pub fn badge(variant: Option<BadgeVariant>) -> &'static str {
    match variant.unwrap_or(BadgeVariant::Default) {
        BadgeVariant::Default => "px-2 py-0.5 rounded-full text-xs font-medium bg-slate-100 text-slate-700",
        BadgeVariant::Success => "px-2 py-0.5 rounded-full text-xs font-medium bg-green-100 text-green-700",
        BadgeVariant::Warning => "px-2 py-0.5 rounded-full text-xs font-medium bg-amber-100 text-amber-700",
        BadgeVariant::Error | BadgeVariant::Danger => {
            "px-2 py-0.5 rounded-full text-xs font-medium bg-red-100 text-red-700"
        }
        BadgeVariant::Primary => "px-2 py-0.5 rounded-full text-xs font-medium bg-indigo-100 text-indigo-700",
        BadgeVariant::Secondary => "px-2 py-0.5 rounded-full text-xs font-medium bg-slate-800 text-white",
        BadgeVariant::Outline => "px-2 py-0.5 rounded-full text-xs font-medium border border-slate-300 text-slate-700",
        BadgeVariant::Ghost => "px-2 py-0.5 rounded-full text-xs font-medium text-slate-600",
    }
}

pub fn alert(tone: Option<AlertTone>) -> &'static str {
    match tone.unwrap_or(AlertTone::Info) {
        AlertTone::Info => "p-4 rounded-lg border bg-blue-50 border-blue-200 text-blue-800",
        AlertTone::Success => "p-4 rounded-lg border bg-green-50 border-green-200 text-green-800",
        AlertTone::Warning => "p-4 rounded-lg border bg-amber-50 border-amber-200 text-amber-800",
        AlertTone::Error => "p-4 rounded-lg border bg-red-50 border-red-200 text-red-800",
    }
}

pub const LIST: &str = "border rounded-xl overflow-hidden";
pub const LIST_HEADER: &str = "bg-slate-50 p-3 font-bold border-b";
pub const LIST_ROW: &str = "p-3 border-b last:border-0 flex justify-between";
pub const TOGGLE: &str = "inline-flex items-center gap-2";
pub const CHECKBOX: &str = "flex items-center gap-2";
pub const AVATAR_IMAGE: &str = "rounded-full object-cover";
pub const AVATAR_INITIALS: &str = "rounded-full bg-slate-200 flex items-center justify-center font-semibold";
pub const DIVIDER: &str = "border-slate-200";
pub const PROGRESS_TRACK: &str = "w-full bg-slate-200 rounded-full h-2";
pub const PROGRESS_BAR: &str = "bg-blue-600 h-2 rounded-full";
pub const RATING: &str = "flex gap-1 text-amber-400";
pub const RADIO_GROUP: &str = "space-y-2";
pub const BREADCRUMB: &str = "flex items-center gap-2 text-sm text-slate-500";
pub const BREADCRUMB_CURRENT: &str = "text-slate-900 font-medium";
pub const TAG: &str = "px-2 py-0.5 rounded bg-indigo-50 text-indigo-700 text-xs";
pub const STAT_LABEL: &str = "text-sm text-slate-500";
pub const STAT_VALUE: &str = "text-2xl font-bold";
pub const STAT_TREND: &str = "text-xs text-green-600";
pub const QUOTE: &str = "border-l-4 border-slate-300 pl-4 italic";
pub const QUOTE_AUTHOR: &str = "block mt-2 text-sm not-italic text-slate-500";
pub const VIDEO: &str = "w-full rounded-lg";
pub const MAP: &str = "w-full h-64 bg-slate-100 rounded-lg flex items-center justify-center text-slate-400";
pub const TABLE: &str = "w-full text-sm text-left";
pub const CODE: &str = "bg-slate-900 text-slate-100 p-4 rounded-lg text-sm overflow-x-auto";
pub const UNKNOWN: &str = "p-2 border border-red-300 text-red-500 text-xs";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_skips_blanks() {
        assert_eq!(join(&["", "  p-4 ", button(Some(ButtonVariant::Primary))]), "p-4 px-4 py-2 rounded-lg bg-blue-600 text-white");
        assert_eq!(join(&["", " "]), "");
    }
}
