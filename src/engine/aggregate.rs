use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::models::{Direction, Instrument, InstrumentKind, Status};

pub const DASHBOARD_MONTHS: usize = 6;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collections {
    pub received_checks: Vec<Instrument>,
    pub issued_checks: Vec<Instrument>,
    pub received_lcrs: Vec<Instrument>,
    pub issued_lcrs: Vec<Instrument>,
}

impl Collections {
    pub fn get(&self, kind: InstrumentKind, direction: Direction) -> &[Instrument] {
        match (kind, direction) {
            (InstrumentKind::Check, Direction::Received) => &self.received_checks,
            (InstrumentKind::Check, Direction::Issued) => &self.issued_checks,
            (InstrumentKind::Lcr, Direction::Received) => &self.received_lcrs,
            (InstrumentKind::Lcr, Direction::Issued) => &self.issued_lcrs,
        }
    }

    fn received(&self) -> impl Iterator<Item = &Instrument> {
        self.received_checks.iter().chain(&self.received_lcrs)
    }

    fn issued(&self) -> impl Iterator<Item = &Instrument> {
        self.issued_checks.iter().chain(&self.issued_lcrs)
    }

    fn all(&self) -> impl Iterator<Item = &Instrument> {
        self.received_checks
            .iter()
            .chain(&self.issued_checks)
            .chain(&self.received_lcrs)
            .chain(&self.issued_lcrs)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_amount: Decimal,
    pub total_received: Decimal,
    pub total_issued: Decimal,
    pub total_pending: Decimal,
    pub total_rejected: Decimal,
}

pub fn compute_stats(collections: &Collections) -> DashboardStats {
    let total_received: Decimal = collections.received().map(|r| r.amount).sum();
    let total_issued: Decimal = collections.issued().map(|r| r.amount).sum();
    let total_pending = collections
        .all()
        .filter(|r| r.status.is_pending())
        .map(|r| r.amount)
        .sum();
    let total_rejected = collections
        .all()
        .filter(|r| r.status.is_rejected())
        .map(|r| r.amount)
        .sum();

    DashboardStats {
        total_amount: total_received + total_issued,
        total_received,
        total_issued,
        total_pending,
        total_rejected,
    }
}

/// Monday and Sunday of the ISO week containing `today`.
pub fn week_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let back = u64::from(today.weekday().num_days_from_monday());
    let start = today.checked_sub_days(Days::new(back)).unwrap_or(NaiveDate::MIN);
    let end = start.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
    (start, end)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpcomingItem {
    #[serde(flatten)]
    pub instrument: Instrument,
    pub is_today: bool,
}

/// Equal due dates keep collection order.
pub fn upcoming_this_week(collections: &Collections, today: NaiveDate) -> Vec<UpcomingItem> {
    let (start, end) = week_bounds(today);
    let mut items: Vec<UpcomingItem> = collections
        .all()
        .filter(|r| r.due_date >= start && r.due_date <= end)
        .map(|r| UpcomingItem {
            instrument: r.clone(),
            is_today: r.due_date == today,
        })
        .collect();
    items.sort_by_key(|item| item.instrument.due_date);
    items
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpcomingGroups {
    pub received_checks: Vec<UpcomingItem>,
    pub issued_checks: Vec<UpcomingItem>,
    pub received_lcrs: Vec<UpcomingItem>,
    pub issued_lcrs: Vec<UpcomingItem>,
}

impl UpcomingGroups {
    pub fn from_items(items: &[UpcomingItem]) -> Self {
        let mut groups = Self::default();
        for item in items {
            let slot = match (item.instrument.kind, item.instrument.direction) {
                (InstrumentKind::Check, Direction::Received) => &mut groups.received_checks,
                (InstrumentKind::Check, Direction::Issued) => &mut groups.issued_checks,
                (InstrumentKind::Lcr, Direction::Received) => &mut groups.received_lcrs,
                (InstrumentKind::Lcr, Direction::Issued) => &mut groups.issued_lcrs,
            };
            slot.push(item.clone());
        }
        groups
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub label: &'static str,
    pub received: usize,
    pub issued: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusDistribution {
    pub kind: InstrumentKind,
    pub buckets: Vec<StatusCount>,
    pub unrecognized: usize,
}

const STATUS_BUCKETS: [&str; 5] = ["Reçu/Émis", "Déposé", "Payé", "Rejeté", "Annulé"];

fn bucket_index(status: &Status) -> Option<usize> {
    match status {
        Status::Received | Status::Issued => Some(0),
        Status::Deposited => Some(1),
        Status::Paid => Some(2),
        Status::Rejected => Some(3),
        Status::Cancelled => Some(4),
        Status::Unrecognized(_) => None,
    }
}

pub fn status_distribution(collections: &Collections, kind: InstrumentKind) -> StatusDistribution {
    let mut buckets: Vec<StatusCount> = STATUS_BUCKETS
        .into_iter()
        .map(|label| StatusCount {
            label,
            received: 0,
            issued: 0,
        })
        .collect();
    let mut unrecognized = 0;

    for direction in [Direction::Received, Direction::Issued] {
        for record in collections.get(kind, direction) {
            let Some(index) = bucket_index(&record.status) else {
                unrecognized += 1;
                continue;
            };
            match direction {
                Direction::Received => buckets[index].received += 1,
                Direction::Issued => buckets[index].issued += 1,
            }
        }
    }

    StatusDistribution {
        kind,
        buckets,
        unrecognized,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTotals {
    pub year: i32,
    pub month: u32,
    pub received_checks: Decimal,
    pub issued_checks: Decimal,
    pub received_lcrs: Decimal,
    pub issued_lcrs: Decimal,
}

impl MonthlyTotals {
    fn cell_mut(&mut self, kind: InstrumentKind, direction: Direction) -> &mut Decimal {
        match (kind, direction) {
            (InstrumentKind::Check, Direction::Received) => &mut self.received_checks,
            (InstrumentKind::Check, Direction::Issued) => &mut self.issued_checks,
            (InstrumentKind::Lcr, Direction::Received) => &mut self.received_lcrs,
            (InstrumentKind::Lcr, Direction::Issued) => &mut self.issued_lcrs,
        }
    }
}

fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

/// Amounts by due-date month for the `months` months ending with the month of
/// `today`, oldest first.
pub fn monthly_totals(collections: &Collections, today: NaiveDate, months: usize) -> Vec<MonthlyTotals> {
    let last = month_index(today);
    let first = last - months as i64 + 1;

    let mut totals: Vec<MonthlyTotals> = (first..=last)
        .map(|index| MonthlyTotals {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
            received_checks: Decimal::ZERO,
            issued_checks: Decimal::ZERO,
            received_lcrs: Decimal::ZERO,
            issued_lcrs: Decimal::ZERO,
        })
        .collect();

    for kind in [InstrumentKind::Check, InstrumentKind::Lcr] {
        for direction in [Direction::Received, Direction::Issued] {
            for record in collections.get(kind, direction) {
                let index = month_index(record.due_date);
                if (first..=last).contains(&index) {
                    *totals[(index - first) as usize].cell_mut(kind, direction) += record.amount;
                }
            }
        }
    }

    totals
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuarterlyTotals {
    pub label: String,
    pub quarter: u32,
    pub received: Decimal,
    pub issued: Decimal,
}

/// Received against issued amounts per calendar quarter of `year`, by due date.
pub fn quarterly_totals(collections: &Collections, year: i32) -> Vec<QuarterlyTotals> {
    let mut totals: Vec<QuarterlyTotals> = (1..=4)
        .map(|quarter| QuarterlyTotals {
            label: format!("Q{quarter} {year}"),
            quarter,
            received: Decimal::ZERO,
            issued: Decimal::ZERO,
        })
        .collect();

    for record in collections.received() {
        if record.due_date.year() == year {
            totals[(record.due_date.month0() / 3) as usize].received += record.amount;
        }
    }
    for record in collections.issued() {
        if record.due_date.year() == year {
            totals[(record.due_date.month0() / 3) as usize].issued += record.amount;
        }
    }

    totals
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub today: NaiveDate,
    pub stats: DashboardStats,
    pub upcoming: Vec<UpcomingItem>,
    pub upcoming_groups: UpcomingGroups,
    pub checks_distribution: StatusDistribution,
    pub lcrs_distribution: StatusDistribution,
    pub monthly: Vec<MonthlyTotals>,
    pub quarterly: Vec<QuarterlyTotals>,
}

impl Dashboard {
    pub fn build(collections: &Collections, today: NaiveDate) -> Self {
        let upcoming = upcoming_this_week(collections, today);
        let upcoming_groups = UpcomingGroups::from_items(&upcoming);

        tracing::debug!(
            %today,
            upcoming = upcoming.len(),
            "dashboard computed"
        );

        Self {
            today,
            stats: compute_stats(collections),
            upcoming,
            upcoming_groups,
            checks_distribution: status_distribution(collections, InstrumentKind::Check),
            lcrs_distribution: status_distribution(collections, InstrumentKind::Lcr),
            monthly: monthly_totals(collections, today, DASHBOARD_MONTHS),
            quarterly: quarterly_totals(collections, today.year()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn record(
        kind: InstrumentKind,
        direction: Direction,
        number: &str,
        amount: i64,
        status: Status,
        due: &str,
    ) -> Instrument {
        let now = Utc::now();
        Instrument {
            id: Uuid::new_v4(),
            kind,
            direction,
            number: number.into(),
            amount: Decimal::new(amount, 0),
            issue_date: date("2024-01-01"),
            due_date: date(due),
            status,
            counterparty_name: "Tiers".into(),
            bank_name: "Attijariwafa".into(),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn rc(number: &str, amount: i64, status: Status, due: &str) -> Instrument {
        record(InstrumentKind::Check, Direction::Received, number, amount, status, due)
    }

    fn ic(number: &str, amount: i64, status: Status, due: &str) -> Instrument {
        record(InstrumentKind::Check, Direction::Issued, number, amount, status, due)
    }

    fn rl(number: &str, amount: i64, status: Status, due: &str) -> Instrument {
        record(InstrumentKind::Lcr, Direction::Received, number, amount, status, due)
    }

    fn il(number: &str, amount: i64, status: Status, due: &str) -> Instrument {
        record(InstrumentKind::Lcr, Direction::Issued, number, amount, status, due)
    }

    #[test]
    fn received_checks_scenario() {
        let collections = Collections {
            received_checks: vec![
                rc("1", 1000, Status::Deposited, "2024-03-10"),
                rc("2", 500, Status::Rejected, "2024-03-12"),
            ],
            ..Default::default()
        };
        let stats = compute_stats(&collections);
        assert_eq!(stats.total_received, Decimal::new(1500, 0));
        assert_eq!(stats.total_issued, Decimal::ZERO);
        assert_eq!(stats.total_pending, Decimal::new(1000, 0));
        assert_eq!(stats.total_rejected, Decimal::new(500, 0));
        assert_eq!(stats.total_amount, Decimal::new(1500, 0));
    }

    #[test]
    fn empty_collections_sum_to_zero() {
        let stats = compute_stats(&Collections::default());
        assert_eq!(stats, DashboardStats::default());
        assert!(upcoming_this_week(&Collections::default(), date("2024-03-13")).is_empty());
    }

    #[test]
    fn pending_covers_all_four_collections() {
        let collections = Collections {
            received_checks: vec![rc("1", 10, Status::Received, "2024-03-10")],
            issued_checks: vec![ic("2", 20, Status::Issued, "2024-03-10")],
            received_lcrs: vec![rl("3", 30, Status::Paid, "2024-03-10")],
            issued_lcrs: vec![il("4", 40, Status::Deposited, "2024-03-10")],
        };
        let stats = compute_stats(&collections);
        assert_eq!(stats.total_pending, Decimal::new(70, 0));
        assert_eq!(stats.total_received, Decimal::new(40, 0));
        assert_eq!(stats.total_issued, Decimal::new(60, 0));
        assert_eq!(stats.total_amount, Decimal::new(100, 0));
    }

    #[test]
    fn unrecognized_status_only_counts_toward_totals() {
        let collections = Collections {
            issued_lcrs: vec![il("x", 75, Status::Unrecognized("Bloqué".into()), "2024-03-10")],
            ..Default::default()
        };
        let stats = compute_stats(&collections);
        assert_eq!(stats.total_issued, Decimal::new(75, 0));
        assert_eq!(stats.total_amount, Decimal::new(75, 0));
        assert_eq!(stats.total_pending, Decimal::ZERO);
        assert_eq!(stats.total_rejected, Decimal::ZERO);
    }

    #[test]
    fn decimal_sums_do_not_drift() {
        let tenth = |n: &str| {
            let mut r = rc(n, 0, Status::Paid, "2024-03-10");
            r.amount = Decimal::new(1, 1);
            r
        };
        let collections = Collections {
            received_checks: (0..10).map(|i| tenth(&i.to_string())).collect(),
            ..Default::default()
        };
        assert_eq!(compute_stats(&collections).total_received, Decimal::ONE);
    }

    #[test]
    fn week_runs_monday_to_sunday() {
        // 2024-03-13 is a Wednesday.
        assert_eq!(
            week_bounds(date("2024-03-13")),
            (date("2024-03-11"), date("2024-03-17"))
        );
        assert_eq!(
            week_bounds(date("2024-03-11")),
            (date("2024-03-11"), date("2024-03-17"))
        );
        assert_eq!(
            week_bounds(date("2024-03-17")),
            (date("2024-03-11"), date("2024-03-17"))
        );
    }

    #[test]
    fn upcoming_selects_week_and_orders_by_due_date() {
        let collections = Collections {
            received_checks: vec![
                rc("rc-sun", 1, Status::Received, "2024-03-17"),
                rc("rc-prev-sun", 1, Status::Received, "2024-03-10"),
            ],
            issued_checks: vec![ic("ic-wed", 1, Status::Issued, "2024-03-13")],
            received_lcrs: vec![rl("rl-mon", 1, Status::Received, "2024-03-11")],
            issued_lcrs: vec![
                il("il-wed", 1, Status::Paid, "2024-03-13"),
                il("il-next-mon", 1, Status::Issued, "2024-03-18"),
            ],
        };
        let upcoming = upcoming_this_week(&collections, date("2024-03-13"));
        let numbers: Vec<&str> = upcoming.iter().map(|i| i.instrument.number.as_str()).collect();
        assert_eq!(numbers, ["rl-mon", "ic-wed", "il-wed", "rc-sun"]);

        let today: Vec<bool> = upcoming.iter().map(|i| i.is_today).collect();
        assert_eq!(today, [false, true, true, false]);
    }

    #[test]
    fn upcoming_groups_follow_kind_and_direction() {
        let collections = Collections {
            received_checks: vec![rc("a", 1, Status::Received, "2024-03-12")],
            issued_checks: vec![ic("b", 1, Status::Issued, "2024-03-12")],
            received_lcrs: vec![rl("c", 1, Status::Received, "2024-03-12")],
            issued_lcrs: vec![il("d", 1, Status::Issued, "2024-03-12")],
        };
        let upcoming = upcoming_this_week(&collections, date("2024-03-12"));
        let groups = UpcomingGroups::from_items(&upcoming);
        assert_eq!(groups.received_checks[0].instrument.number, "a");
        assert_eq!(groups.issued_checks[0].instrument.number, "b");
        assert_eq!(groups.received_lcrs[0].instrument.number, "c");
        assert_eq!(groups.issued_lcrs[0].instrument.number, "d");
    }

    #[test]
    fn status_distribution_counts_per_direction() {
        let collections = Collections {
            received_checks: vec![
                rc("1", 1, Status::Received, "2024-03-10"),
                rc("2", 1, Status::Rejected, "2024-03-10"),
                rc("3", 1, Status::Unrecognized("?".into()), "2024-03-10"),
            ],
            issued_checks: vec![
                ic("4", 1, Status::Issued, "2024-03-10"),
                ic("5", 1, Status::Issued, "2024-03-10"),
            ],
            received_lcrs: vec![rl("6", 1, Status::Paid, "2024-03-10")],
            ..Default::default()
        };
        let checks = status_distribution(&collections, InstrumentKind::Check);
        assert_eq!(checks.buckets[0].label, "Reçu/Émis");
        assert_eq!((checks.buckets[0].received, checks.buckets[0].issued), (1, 2));
        assert_eq!((checks.buckets[3].received, checks.buckets[3].issued), (1, 0));
        assert_eq!(checks.unrecognized, 1);

        let lcrs = status_distribution(&collections, InstrumentKind::Lcr);
        assert_eq!(lcrs.buckets[2].received, 1);
        assert_eq!(lcrs.unrecognized, 0);
    }

    #[test]
    fn monthly_totals_cover_trailing_months_across_year_end() {
        let collections = Collections {
            received_checks: vec![
                rc("1", 100, Status::Paid, "2023-12-05"),
                rc("2", 50, Status::Paid, "2023-08-31"),
            ],
            issued_lcrs: vec![il("3", 70, Status::Paid, "2024-02-29")],
            ..Default::default()
        };
        let months = monthly_totals(&collections, date("2024-02-10"), 6);
        let labels: Vec<(i32, u32)> = months.iter().map(|m| (m.year, m.month)).collect();
        assert_eq!(
            labels,
            [(2023, 9), (2023, 10), (2023, 11), (2023, 12), (2024, 1), (2024, 2)]
        );
        assert_eq!(months[3].received_checks, Decimal::new(100, 0));
        assert_eq!(months[5].issued_lcrs, Decimal::new(70, 0));
        let total: Decimal = months.iter().map(|m| m.received_checks).sum();
        assert_eq!(total, Decimal::new(100, 0));
    }

    #[test]
    fn quarterly_totals_split_received_and_issued() {
        let collections = Collections {
            received_checks: vec![rc("1", 10, Status::Paid, "2024-02-01")],
            received_lcrs: vec![rl("2", 5, Status::Paid, "2024-03-31")],
            issued_checks: vec![
                ic("3", 7, Status::Paid, "2024-12-31"),
                ic("4", 99, Status::Paid, "2023-12-31"),
            ],
            ..Default::default()
        };
        let quarters = quarterly_totals(&collections, 2024);
        assert_eq!(quarters[0].label, "Q1 2024");
        assert_eq!(quarters[0].received, Decimal::new(15, 0));
        assert_eq!(quarters[3].issued, Decimal::new(7, 0));
        assert_eq!(quarters[3].received, Decimal::ZERO);
    }

    #[test]
    fn dashboard_bundles_everything() {
        let collections = Collections {
            received_checks: vec![rc("1", 1000, Status::Deposited, "2024-03-13")],
            ..Default::default()
        };
        let dashboard = Dashboard::build(&collections, date("2024-03-13"));
        assert_eq!(dashboard.stats.total_pending, Decimal::new(1000, 0));
        assert_eq!(dashboard.upcoming.len(), 1);
        assert!(dashboard.upcoming[0].is_today);
        assert_eq!(dashboard.upcoming_groups.received_checks.len(), 1);
        assert_eq!(dashboard.monthly.len(), DASHBOARD_MONTHS);
        assert_eq!(dashboard.quarterly.len(), 4);
    }
}
