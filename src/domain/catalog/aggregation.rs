use super::entities::Product;
use serde::Serialize;

/// Chart-ready dataset: ordered labels with parallel numeric values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDataset {
    labels: Vec<String>,
    values: Vec<f64>,
}

impl ChartDataset {
    /// Build from pairs so labels and values cannot drift out of lockstep
    pub fn from_pairs<I, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (L, f64)>,
        L: Into<String>,
    {
        let mut labels = Vec::new();
        let mut values = Vec::new();
        for (label, value) in pairs {
            labels.push(label.into());
            values.push(value);
        }
        Self { labels, values }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn max_value(&self) -> f64 {
        self.values.iter().cloned().fold(0.0, f64::max)
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// Contiguous price interval, upper bound inclusive, `None` for the open top band
#[derive(Debug, Clone, Copy)]
pub struct PriceBand {
    pub label: &'static str,
    pub upper: Option<f64>,
}

impl PriceBand {
    /// First-match scan semantics: a band admits every price at or below its
    /// upper bound, so ordered iteration yields an exhaustive partition.
    pub fn admits(&self, price: f64) -> bool {
        match self.upper {
            Some(upper) => price <= upper,
            None => true,
        }
    }
}

/// Ordered histogram bands over the price axis
pub const PRICE_BANDS: [PriceBand; 4] = [
    PriceBand { label: "0 - 50K", upper: Some(50_000.0) },
    PriceBand { label: "50K - 100K", upper: Some(100_000.0) },
    PriceBand { label: "100K - 200K", upper: Some(200_000.0) },
    PriceBand { label: "200K+", upper: None },
];

/// Split point between the affordable and premium buckets
pub const ECONOMY_THRESHOLD: f64 = 100_000.0;

/// Count products per price band; empty input yields all-zero buckets
pub fn price_histogram(products: &[Product]) -> ChartDataset {
    let mut counts = [0u64; PRICE_BANDS.len()];
    for product in products {
        let price = product.price.value();
        if let Some(slot) = PRICE_BANDS.iter().position(|band| band.admits(price)) {
            counts[slot] += 1;
        }
    }
    ChartDataset::from_pairs(
        PRICE_BANDS
            .iter()
            .zip(counts)
            .map(|(band, count)| (band.label, count as f64)),
    )
}

/// Two-bucket dataset: products at or under the threshold vs above it
pub fn economy_split(products: &[Product], threshold: f64) -> ChartDataset {
    let affordable = products
        .iter()
        .filter(|product| product.price.value() <= threshold)
        .count();
    let premium = products.len() - affordable;
    ChartDataset::from_pairs([
        (format!("Affordable (≤ {})", short_amount(threshold)), affordable as f64),
        (format!("Premium (> {})", short_amount(threshold)), premium as f64),
    ])
}

/// Two-segment dataset for the import progress indicator
pub fn progress_donut(percent: f64) -> ChartDataset {
    let done = percent.clamp(0.0, 100.0);
    ChartDataset::from_pairs([
        ("Done".to_string(), done),
        ("Remaining".to_string(), 100.0 - done),
    ])
}

fn short_amount(value: f64) -> String {
    if value >= 1_000.0 && value % 1_000.0 == 0.0 {
        format!("{}K", (value / 1_000.0) as u64)
    } else {
        format!("{}", value)
    }
}
