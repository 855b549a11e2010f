use crate::market::MarketStats;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Group")]
    group: &'static str,
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Count")]
    count: usize,
}

impl StatRow {
    fn new(group: &'static str, metric: impl Into<String>, count: usize) -> Self {
        Self { group, metric: metric.into(), count }
    }
}

/// Summary table printed by `jobmarket stats`: headline counts, then one
/// row per city and per top service
pub fn stats_table(stats: &MarketStats) -> String {
    let mut rows = vec![
        StatRow::new("Providers", "total", stats.total_providers),
        StatRow::new("Providers", "available now", stats.available_providers),
        StatRow::new("Seekers", "total", stats.total_seekers),
        StatRow::new("Requests", "posted", stats.total_requests),
        StatRow::new("Requests", "open", stats.open_requests),
    ];
    rows.extend(stats.cities.iter().map(|(city, n)| StatRow::new("City", city.as_str(), *n)));
    rows.extend(
        stats
            .top_services
            .iter()
            .map(|(service, n)| StatRow::new("Service", service.as_str(), *n)),
    );

    Table::new(rows).with(Style::rounded()).to_string()
}
