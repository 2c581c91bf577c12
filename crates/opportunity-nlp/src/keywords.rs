//! Reference keyword data for candidate filtering and reports.
//!
//! Nothing in here affects scoring. The tables drive the ingestion-side
//! candidate checks and label topics with a human-readable category.

use crate::text::{contains_term, normalize_phrase};

/// Community channels the collector follows.
pub const TRACKED_SOURCES: &[&str] = &[
    "india", "bangalore", "delhi", "mumbai", "hyderabad", "pune",
    "IndiaSocial", "developersIndia", "IndianStockMarket", "IndianGaming",
    "jobs", "cscareerquestions", "careeradvice", "resumes",
    "WorkOnline", "jobsearchhacks", "freelance", "Upwork",
    "Entrepreneur", "startups", "smallbusiness", "SideProject", "SaaS",
    "ProductManagement", "webdev", "learnprogramming", "SoftwareEngineering",
    "datascience", "MachineLearning", "artificial", "technology",
    "personalfinance", "LifeProTips", "NoStupidQuestions",
    "TooAfraidToAsk", "productivity", "selfimprovement",
    "relationships", "dating", "socialskills",
    "college", "GradSchool", "education",
    "health", "mentalhealth", "depression", "anxiety",
    "fitness", "loseit",
    "legaladvice", "IndiaInvestments",
    "housing", "renting", "roommates",
    "cars", "bikes", "india_travel",
    "food", "Cooking", "EatCheapAndHealthy",
    "CustomerService", "UXDesign", "UI_Design",
    "ecommerce", "shopify", "AmazonSeller",
];

/// Phrases that signal a complaint or unmet need.
pub const PAIN_POINT_KEYWORDS: &[&str] = &[
    "frustrating", "annoying", "hate", "worst", "terrible", "horrible",
    "sucks", "bad experience", "disappointed", "regret",
    "waste of time", "waste of money", "painful",
    "problem", "issue", "issues", "struggle", "struggling",
    "difficult", "hard to", "complicated", "confusing",
    "can't find", "cannot find", "can't afford", "too expensive",
    "need help", "looking for", "wish there was",
    "why is there no", "why doesn't", "someone should make",
    "no jobs", "unemployed", "jobless", "can't get hired",
    "rejected", "ghosted", "low salary", "underpaid",
    "overworked", "burnout", "toxic workplace",
    "bad manager", "no work life balance",
    "missing feature", "doesn't support", "not available",
    "no alternative", "no option", "wish i could",
    "expensive", "overpriced", "hidden charges", "scam",
    "takes too long", "slow", "inefficient",
    "manual process", "repetitive", "tedious",
    "buggy", "keeps crashing", "doesn't work",
    "poor support", "customer service is bad",
    "hard to use", "not user friendly",
    "stressful", "tired", "exhausted", "anxiety",
    "depressed", "lonely", "demotivated",
    "confusing ui", "bad ux", "clunky",
    "wasted hours", "no response", "ignored",
];

/// Phrases that signal willingness to adopt or pay for a solution.
pub const OPPORTUNITY_KEYWORDS: &[&str] = &[
    "need", "want", "looking for", "searching for",
    "wish there was", "someone should build",
    "would pay for", "i'd pay", "i would pay",
    "i'd buy", "i would buy",
    "recommend me", "suggest me",
    "what's the best", "best tool for",
    "alternative to", "replacement for",
    "solution for", "any app for",
    "is there a tool", "any service",
    "help me find", "idea for",
    "startup idea", "business idea",
    "automation for", "tool that can",
    "platform that helps", "software that",
];

/// Category name -> trigger terms. Table order breaks categorization ties.
pub const PAIN_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Career",
        &["job", "career", "unemployed", "salary", "interview", "resume", "hiring", "promotion", "layoff"],
    ),
    (
        "Education",
        &["course", "learning", "study", "college", "exam", "skill", "tutorial", "degree", "placement"],
    ),
    (
        "Finance",
        &["money", "expensive", "cost", "afford", "invest", "savings", "loan", "debt", "credit"],
    ),
    (
        "Health",
        &["health", "mental", "stress", "sleep", "fitness", "medical", "doctor", "anxiety", "depression"],
    ),
    (
        "Technology",
        &["app", "software", "bug", "feature", "platform", "tool", "website", "ui", "ux", "crash"],
    ),
    (
        "Lifestyle",
        &["time", "productivity", "habit", "routine", "balance", "organize", "daily", "focus"],
    ),
    (
        "Business",
        &["startup", "business", "customer", "marketing", "sales", "revenue", "growth", "profit"],
    ),
    (
        "Housing",
        &["rent", "apartment", "housing", "landlord", "roommate", "flat", "deposit"],
    ),
    (
        "Transportation",
        &["commute", "traffic", "transport", "bike", "car", "metro", "bus"],
    ),
    (
        "Food",
        &["food", "delivery", "restaurant", "cooking", "meal", "diet", "grocery"],
    ),
    (
        "Relationships",
        &["relationship", "dating", "breakup", "friends", "family", "marriage"],
    ),
    (
        "CustomerService",
        &["support", "customer service", "complaint", "refund", "return", "response"],
    ),
];

/// Category names in table order.
pub fn category_names() -> impl Iterator<Item = &'static str> {
    PAIN_CATEGORIES.iter().map(|(name, _)| *name)
}

/// Trigger terms of a category.
pub fn category_terms(name: &str) -> Option<&'static [&'static str]> {
    PAIN_CATEGORIES
        .iter()
        .find(|(category, _)| *category == name)
        .map(|(_, terms)| *terms)
}

/// Dominant category of a text.
///
/// Counts whole-word hits of each category's terms; the category with the
/// most hits wins, ties go to the earlier table entry. Returns `None` when no
/// term matches.
pub fn categorize(text: &str) -> Option<&'static str> {
    let haystack = normalize_phrase(text);
    let mut best: Option<(&'static str, usize)> = None;

    for &(name, terms) in PAIN_CATEGORIES {
        let hits = count_hits(&haystack, terms);
        if hits == 0 {
            continue;
        }
        if best.map_or(true, |(_, top)| hits > top) {
            best = Some((name, hits));
        }
    }

    best.map(|(name, _)| name)
}

/// True if the text contains any pain-point phrase.
pub fn is_pain_point(text: &str) -> bool {
    let haystack = normalize_phrase(text);
    count_hits(&haystack, PAIN_POINT_KEYWORDS) > 0
}

/// True if the text contains any opportunity phrase.
pub fn is_opportunity(text: &str) -> bool {
    let haystack = normalize_phrase(text);
    count_hits(&haystack, OPPORTUNITY_KEYWORDS) > 0
}

/// True if the channel is tracked; case-insensitive.
pub fn is_tracked_source(name: &str) -> bool {
    let name = name.trim().trim_start_matches("r/");
    TRACKED_SOURCES
        .iter()
        .any(|source| source.eq_ignore_ascii_case(name))
}

fn count_hits(haystack: &str, terms: &[&str]) -> usize {
    terms
        .iter()
        .filter(|term| contains_term(haystack, term))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_table_order() {
        let names: Vec<&str> = category_names().collect();
        assert_eq!(names.len(), 12);
        assert_eq!(names[0], "Career");
        assert_eq!(names[7], "Housing");
        assert_eq!(names[11], "CustomerService");
    }

    #[test]
    fn test_category_terms_lookup() {
        assert!(category_terms("Housing").unwrap().contains(&"landlord"));
        assert!(category_terms("Astrology").is_none());
    }

    #[test]
    fn test_categorize_most_hits() {
        assert_eq!(
            categorize("My landlord kept the deposit and raised rent"),
            Some("Housing")
        );
        assert_eq!(
            categorize("Salary after the interview was low, no promotion either"),
            Some("Career")
        );
    }

    #[test]
    fn test_categorize_tie_goes_to_table_order() {
        // One Career hit (job), one Housing hit (rent)
        assert_eq!(categorize("job pays less than rent"), Some("Career"));
    }

    #[test]
    fn test_categorize_whole_words_only() {
        // "apple" must not match "app", "carpet" must not match "car"
        assert_eq!(categorize("apple carpet"), None);
    }

    #[test]
    fn test_categorize_multi_word_term() {
        assert_eq!(
            categorize("Customer service never answered my complaint"),
            Some("CustomerService")
        );
    }

    #[test]
    fn test_is_pain_point() {
        assert!(is_pain_point("This is so frustrating, I can't find a flat"));
        assert!(is_pain_point("Completely UNDERPAID here"));
        assert!(!is_pain_point("Had a lovely day at the beach"));
    }

    #[test]
    fn test_is_opportunity() {
        assert!(is_opportunity("I would pay for an app that splits rent"));
        assert!(is_opportunity("Is there a tool for tracking invoices?"));
        assert!(!is_opportunity("Sunset photos from today"));
    }

    #[test]
    fn test_is_tracked_source() {
        assert!(is_tracked_source("developersIndia"));
        assert!(is_tracked_source("DEVELOPERSINDIA"));
        assert!(is_tracked_source("r/SaaS"));
        assert!(!is_tracked_source("aww"));
    }
}
