//! Deal records and the result table they are aggregated into.

use crate::parser::DetailFields;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use vipon_core::ProductId;

/// Everything extracted for one link, before the crawl date is stamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDeal {
    pub product_id: ProductId,
    pub fields: DetailFields,
    pub code: Option<String>,
}

/// One exported row. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealRecord {
    pub product_id: ProductId,
    pub title: String,
    pub category: String,
    pub like: u32,
    pub dislike: u32,
    pub discount: String,
    pub code: Option<String>,
    pub expiry_time: String,
    pub list_price: String,
    pub sales_price: String,
    pub amazon_url: String,
    pub crawl_date: NaiveDate,
}

impl DealRecord {
    #[must_use]
    pub fn new(deal: ExtractedDeal, crawl_date: NaiveDate) -> Self {
        let ExtractedDeal {
            product_id,
            fields,
            code,
        } = deal;

        Self {
            product_id,
            title: fields.title,
            category: fields.category,
            like: fields.like,
            dislike: fields.dislike,
            discount: fields.discount,
            code,
            expiry_time: fields.expiry_time,
            list_price: fields.list_price,
            sales_price: fields.sales_price,
            amazon_url: fields.amazon_url,
            crawl_date,
        }
    }
}

/// Accumulates extracted deals in processing order.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    deals: Vec<ExtractedDeal>,
}

impl ResultAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, deal: ExtractedDeal) {
        self.deals.push(deal);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.deals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deals.is_empty()
    }

    /// Stamp every deal with `crawl_date` and freeze the table.
    #[must_use]
    pub fn finalize(self, crawl_date: NaiveDate) -> ResultTable {
        let rows = self
            .deals
            .into_iter()
            .map(|deal| DealRecord::new(deal, crawl_date))
            .collect();

        ResultTable { rows, crawl_date }
    }
}

/// Finished, read-only table of deal records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultTable {
    rows: Vec<DealRecord>,
    crawl_date: NaiveDate,
}

impl ResultTable {
    #[must_use]
    pub fn rows(&self) -> &[DealRecord] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn crawl_date(&self) -> NaiveDate {
        self.crawl_date
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DealRecord> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a ResultTable {
    type Item = &'a DealRecord;
    type IntoIter = std::slice::Iter<'a, DealRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
