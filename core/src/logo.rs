//! Company logo lookup by bill name.
//!
//! A static, ordered rule table maps name substrings to a company domain;
//! the first matching rule wins. Names are matched case-insensitively.
//! When nothing matches (or the image fails to load client-side) the bill
//! is shown with a category icon instead.

use crate::types::Category;

pub struct LogoRule {
    /// At least one must occur in the name.
    pub patterns: &'static [&'static str],
    /// If non-empty, at least one must also occur in the name.
    pub qualifiers: &'static [&'static str],
    pub domain: &'static str,
}

impl LogoRule {
    const fn any(patterns: &'static [&'static str], domain: &'static str) -> Self {
        Self { patterns, qualifiers: &[], domain }
    }

    const fn with(
        patterns: &'static [&'static str],
        qualifiers: &'static [&'static str],
        domain: &'static str,
    ) -> Self {
        Self { patterns, qualifiers, domain }
    }

    fn matches(&self, lowered: &str) -> bool {
        self.patterns.iter().any(|p| lowered.contains(p))
            && (self.qualifiers.is_empty() || self.qualifiers.iter().any(|q| lowered.contains(q)))
    }
}

pub const LOGO_RULES: &[LogoRule] = &[
    // Telecom / internet
    LogoRule::any(&["verizon"], "verizon.com"),
    LogoRule::any(&["att", "at&t"], "att.com"),
    LogoRule::any(&["tmobile", "t-mobile"], "t-mobile.com"),
    LogoRule::any(&["sprint"], "sprint.com"),
    LogoRule::any(&["xfinity"], "xfinity.com"),
    LogoRule::any(&["comcast"], "comcast.com"),
    LogoRule::any(&["spectrum"], "spectrum.com"),
    LogoRule::any(&["charter"], "charter.com"),
    LogoRule::any(&["cox"], "cox.com"),
    LogoRule::any(&["optimum"], "optimum.com"),
    LogoRule::any(&["altice"], "alticeusa.com"),
    // Credit cards / banks
    LogoRule::any(&["chase"], "chase.com"),
    LogoRule::any(&["discover"], "discover.com"),
    LogoRule::any(&["capital one", "capitalone"], "capitalone.com"),
    LogoRule::any(&["american express", "amex"], "americanexpress.com"),
    LogoRule::any(&["citi", "citibank"], "citibank.com"),
    LogoRule::any(&["wells fargo", "wellsfargo"], "wellsfargo.com"),
    LogoRule::any(&["bank of america", "boa"], "bankofamerica.com"),
    LogoRule::any(&["usaa"], "usaa.com"),
    LogoRule::any(&["navy federal"], "navyfederal.org"),
    // Utilities
    LogoRule::any(&["pge", "pacific gas"], "pge.com"),
    LogoRule::any(&["edison", "sce"], "sce.com"),
    LogoRule::any(&["duke energy"], "duke-energy.com"),
    LogoRule::any(&["georgia power"], "georgiapower.com"),
    LogoRule::any(&["pepco"], "pepco.com"),
    LogoRule::any(&["sdge"], "sdge.com"),
    LogoRule::any(&["con ed", "coned"], "coned.com"),
    // Streaming / subscriptions
    LogoRule::any(&["netflix"], "netflix.com"),
    LogoRule::any(&["spotify"], "spotify.com"),
    LogoRule::with(&["apple"], &["music", "tv", "icloud"], "apple.com"),
    LogoRule::with(&["amazon"], &["prime"], "amazon.com"),
    LogoRule::any(&["disney"], "disney.com"),
    LogoRule::any(&["hulu"], "hulu.com"),
    LogoRule::any(&["hbo"], "hbo.com"),
    LogoRule::with(&["max"], &["streaming", "tv"], "max.com"),
    LogoRule::any(&["youtube"], "youtube.com"),
    LogoRule::any(&["twitch"], "twitch.tv"),
    LogoRule::any(&["paramount"], "paramount.com"),
    LogoRule::any(&["peacock"], "peacocktv.com"),
    // Insurance
    LogoRule::any(&["geico"], "geico.com"),
    LogoRule::any(&["state farm"], "statefarm.com"),
    LogoRule::any(&["allstate"], "allstate.com"),
    LogoRule::any(&["progressive"], "progressive.com"),
    LogoRule::any(&["farmers"], "farmers.com"),
    LogoRule::any(&["liberty mutual"], "libertymutual.com"),
    // Software and retail
    LogoRule::any(&["microsoft"], "microsoft.com"),
    LogoRule::any(&["google"], "google.com"),
    LogoRule::any(&["adobe"], "adobe.com"),
    LogoRule::any(&["dropbox"], "dropbox.com"),
    LogoRule::any(&["slack"], "slack.com"),
    LogoRule::any(&["zoom"], "zoom.us"),
    LogoRule::any(&["bestbuy", "best buy"], "bestbuy.com"),
];

pub fn company_domain(bill_name: &str) -> Option<&'static str> {
    let lowered = bill_name.to_lowercase();
    LOGO_RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.domain)
}

/// Logo image URL under `base_url`, if the name maps to a known company.
pub fn logo_url(base_url: &str, bill_name: &str) -> Option<String> {
    company_domain(bill_name)
        .map(|domain| format!("{}/{domain}", base_url.trim_end_matches('/')))
}

// (category, name keywords, icon); first row whose category or keyword matches wins.
const FALLBACK_ICONS: &[(Category, &[&str], &str)] = &[
    (Category::PhoneInternet, &["phone", "internet"], "📱"),
    (Category::CreditCards, &["credit", "card"], "💳"),
    (Category::Utilities, &["electric", "gas", "water"], "⚡"),
    (Category::Insurance, &["insurance"], "🛡️"),
    (Category::Subscriptions, &["subscription", "streaming"], "📺"),
    (Category::RentMortgage, &["rent", "mortgage"], "🏠"),
    (Category::Loans, &["loan"], "🏦"),
];

const DEFAULT_ICON: &str = "📄";

pub fn fallback_icon(bill_name: &str, category: Category) -> &'static str {
    let lowered = bill_name.to_lowercase();
    FALLBACK_ICONS
        .iter()
        .find(|(cat, keywords, _)| *cat == category || keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, _, icon)| *icon)
        .unwrap_or(DEFAULT_ICON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_case_insensitively() {
        assert_eq!(company_domain("NETFLIX Premium"), Some("netflix.com"));
        assert_eq!(company_domain("AT&T Wireless"), Some("att.com"));
    }

    #[test]
    fn qualified_rules_need_a_qualifier() {
        assert_eq!(company_domain("Apple Music"), Some("apple.com"));
        assert_eq!(company_domain("Apple"), None);
        assert_eq!(company_domain("Amazon Prime"), Some("amazon.com"));
        assert_eq!(company_domain("Amazon"), None);
    }

    #[test]
    fn first_match_wins() {
        // "Chase" appears before "Discover" in the table.
        assert_eq!(company_domain("Chase Discover"), Some("chase.com"));
    }

    #[test]
    fn unknown_names_have_no_logo() {
        assert_eq!(company_domain("Landlord"), None);
        assert_eq!(logo_url("https://logo.clearbit.com", "Landlord"), None);
    }

    #[test]
    fn logo_url_joins_base_and_domain() {
        assert_eq!(
            logo_url("https://logo.clearbit.com/", "Spotify Family").as_deref(),
            Some("https://logo.clearbit.com/spotify.com")
        );
    }

    #[test]
    fn fallback_icon_prefers_earlier_rows() {
        assert_eq!(fallback_icon("Home internet", Category::Other), "📱");
        assert_eq!(fallback_icon("Visa card", Category::Loans), "💳");
        assert_eq!(fallback_icon("Student loan", Category::Other), "🏦");
        assert_eq!(fallback_icon("Landlord", Category::RentMortgage), "🏠");
        assert_eq!(fallback_icon("Landlord", Category::Other), "📄");
    }
}
