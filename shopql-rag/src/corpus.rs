//! The embedded knowledge corpus.
//!
//! These snippets are everything the retrieval layer knows: table schemas,
//! worked question/SQL pairs, column semantics, and metric formulas.
//! Position in the array is the document id, so reordering or removing
//! entries invalidates any persisted index (delete the artifacts to force a
//! rebuild after editing).

use crate::document::Document;

/// Knowledge snippets available for retrieval, in id order.
pub const CORPUS: [&str; 25] = [
    // Schema descriptions
    "Table: sales_summary, Columns: date (date), item_id (numeric ID), total_sales (numeric), total_units_ordered (numeric). Describes daily sales and units for items. Use for questions about sales, units, or item performance.",
    "Table: ad_data, Columns: date (date), item_id (numeric ID), ad_sales (numeric), impressions (numeric), ad_spend (numeric), clicks (numeric), units_sold (numeric). Contains advertising performance metrics. Use for questions about ads, spend, impressions, clicks, or ad-related sales.",
    "Table: eligibility_status, Columns: eligibility_datetime_utc (datetime), item_id (numeric ID), eligibility (text/boolean), message (text). Tracks item eligibility status. Use for questions about eligibility or status.",
    // Worked question/SQL pairs
    "Q: What is the total revenue? A: SELECT SUM(total_sales) FROM sales_summary;",
    "Q: Show all ad-related metrics. A: SELECT * FROM ad_data;",
    "Q: Show eligibility status of items. A: SELECT item_id, eligibility, message FROM eligibility_status;",
    "Q: What is the highest CPC? A: SELECT MAX(ad_spend / clicks) FROM ad_data WHERE clicks > 0;",
    "Q: What is the total sales for each item? A: SELECT item_id, SUM(total_sales) AS total_sales_per_item FROM sales_summary GROUP BY item_id ORDER BY total_sales_per_item DESC;",
    "Q: Show me monthly ad spend over time. A: SELECT TO_CHAR(date, 'YYYY-MM') AS month, SUM(ad_spend) AS monthly_ad_spend FROM ad_data GROUP BY TO_CHAR(date, 'YYYY-MM') ORDER BY TO_CHAR(date, 'YYYY-MM');",
    "Q: Compare ad spend vs. ad sales for different items. A: SELECT item_id, SUM(ad_spend) AS total_ad_spend, SUM(ad_sales) AS total_ad_sales FROM ad_data GROUP BY item_id;",
    "Q: What is the average daily units ordered? A: SELECT AVG(total_units_ordered) FROM sales_summary;",
    "Q: Which item has the most impressions? A: SELECT item_id, SUM(impressions) AS total_impressions FROM ad_data GROUP BY item_id ORDER BY total_impressions DESC LIMIT 1;",
    "Q: How many items are currently eligible? A: SELECT COUNT(DISTINCT item_id) FROM eligibility_status WHERE eligibility = 'true';",
    // Column semantics
    "Column: total_sales (sales_summary) - monetary value of sales.",
    "Column: total_units_ordered (sales_summary) - quantity of items sold.",
    "Column: ad_spend (ad_data) - money spent on advertising campaigns.",
    "Column: ad_sales (ad_data) - sales directly generated from ads.",
    "Column: clicks (ad_data) - number of times ads were clicked.",
    "Column: impressions (ad_data) - number of times ads were shown.",
    "Column: units_sold (ad_data) - quantity of units sold through advertising.",
    "Column: eligibility (eligibility_status) - status of an item's eligibility (e.g., 'true', 'false', 'eligible', 'not eligible').",
    // Metric formulas and dialect hints
    "Calculation: ROAS (Return on Ad Spend) = SUM(ad_sales) / SUM(ad_spend).",
    "Calculation: CPC (Cost Per Click) = ad_spend / clicks.",
    "Calculation: CTR (Click-Through Rate) = clicks / impressions.",
    "Always use TO_CHAR(date_column, 'YYYY-MM') for monthly grouping in PostgreSQL.",
];

/// The corpus as [`Document`]s with their positional ids assigned.
pub fn corpus_documents() -> Vec<Document> {
    CORPUS
        .iter()
        .enumerate()
        .map(|(id, text)| Document { id, text: (*text).to_string() })
        .collect()
}
