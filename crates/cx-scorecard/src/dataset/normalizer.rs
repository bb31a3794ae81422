use crate::scoring::domain::{ChannelType, Phase, ReviewChannel, ServiceKind};

pub(crate) fn normalize_label(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "").replace(['-', '_'], " ");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_ascii_lowercase()
}

pub(crate) fn channel_type(value: &str) -> Option<ChannelType> {
    match normalize_label(value).as_str() {
        "app" | "mobile app" => Some(ChannelType::App),
        "web" | "web portal" | "website" => Some(ChannelType::Web),
        "service center" | "service centre" => Some(ChannelType::ServiceCenter),
        "shared platform" => Some(ChannelType::SharedPlatform),
        _ => None,
    }
}

pub(crate) fn review_channel(value: &str) -> Option<ReviewChannel> {
    match normalize_label(value).as_str() {
        "app" | "mobile app" => Some(ReviewChannel::App),
        "web" | "web portal" | "website" => Some(ReviewChannel::Web),
        "shared" | "shared platform" => Some(ReviewChannel::Shared),
        _ => None,
    }
}

pub(crate) fn phase(value: &str) -> Option<Phase> {
    match normalize_label(value).as_str() {
        "process" => Some(Phase::Process),
        "deliverable" => Some(Phase::Deliverable),
        _ => None,
    }
}

pub(crate) fn service_kind(value: &str) -> Option<ServiceKind> {
    match normalize_label(value).as_str() {
        "1" | "simple" => Some(ServiceKind::Simple),
        "2" | "multiphase" | "multi phase" => Some(ServiceKind::Multiphase),
        _ => None,
    }
}

/// Splits a `;`-separated cell, dropping blanks.
pub(crate) fn split_list(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
