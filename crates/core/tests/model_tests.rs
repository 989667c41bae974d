use chrono::NaiveDate;
use portfolio_ledger_core::errors::CoreError;
use portfolio_ledger_core::models::category::Category;
use portfolio_ledger_core::models::filter::{ActiveFilter, CategoryFilter, RecencyFilter};
use portfolio_ledger_core::models::ledger::Ledger;
use portfolio_ledger_core::models::metrics::{round2, Allocation, Metrics};
use portfolio_ledger_core::models::record::{parse_iso_date, parse_real, InvestmentRecord};
use portfolio_ledger_core::models::settings::{Settings, ValuationBasis, DEFAULT_DATA_FILE};
use std::path::PathBuf;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn rec(category: Category, amount: f64, price: f64) -> InvestmentRecord {
    InvestmentRecord::new(category, amount, price, d(2024, 1, 1))
}

// ═══════════════════════════════════════════════════════════════════
//  Category
// ═══════════════════════════════════════════════════════════════════

mod category {
    use super::*;

    #[test]
    fn display_uses_wire_names() {
        assert_eq!(Category::Stocks.to_string(), "Stocks");
        assert_eq!(Category::Bonds.to_string(), "Bonds");
        assert_eq!(Category::RealEstate.to_string(), "Real Estate");
        assert_eq!(Category::MutualFunds.to_string(), "Mutual Funds");
        assert_eq!(Category::Other.to_string(), "Other");
    }

    #[test]
    fn parse_accepts_display_and_compact_forms() {
        assert_eq!(Category::parse_canonical("Real Estate"), Some(Category::RealEstate));
        assert_eq!(Category::parse_canonical("RealEstate"), Some(Category::RealEstate));
        assert_eq!(Category::parse_canonical("Mutual Funds"), Some(Category::MutualFunds));
        assert_eq!(Category::parse_canonical("MutualFunds"), Some(Category::MutualFunds));
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!(Category::parse_canonical("stocks"), None);
        assert_eq!(Category::parse_canonical("Crypto"), None);
    }

    #[test]
    fn unknown_string_becomes_unrecognized() {
        let c = Category::from("Crypto".to_string());
        assert_eq!(c, Category::Unrecognized("Crypto".into()));
        assert!(!c.is_canonical());
        assert_eq!(c.to_string(), "Crypto");
    }

    #[test]
    fn all_lists_five_in_order() {
        let names: Vec<String> = Category::ALL.iter().map(|c| c.to_string()).collect();
        assert_eq!(names, ["Stocks", "Bonds", "Real Estate", "Mutual Funds", "Other"]);
        assert!(Category::ALL.iter().all(Category::is_canonical));
    }

    #[test]
    fn serde_round_trips_as_plain_string() {
        let json = serde_json::to_string(&Category::RealEstate).unwrap();
        assert_eq!(json, "\"Real Estate\"");
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Category::RealEstate);

        let odd: Category = serde_json::from_str("\"Art\"").unwrap();
        assert_eq!(serde_json::to_string(&odd).unwrap(), "\"Art\"");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  InvestmentRecord
// ═══════════════════════════════════════════════════════════════════

mod investment_record {
    use super::*;

    #[test]
    fn cost_is_amount_times_price() {
        assert_eq!(rec(Category::Stocks, 10.0, 5.0).cost(), 50.0);
    }

    #[test]
    fn marked_value_falls_back_to_buying_price() {
        let mut r = rec(Category::Stocks, 10.0, 5.0);
        assert_eq!(r.marked_value(), 50.0);
        r.current_price = Some(6.0);
        assert_eq!(r.marked_value(), 60.0);
    }

    #[test]
    fn serializes_with_data_file_keys() {
        let r = rec(Category::Bonds, 5.0, 2.0);
        let v: serde_json::Value = serde_json::to_value(&r).unwrap();
        assert_eq!(v["type"], "Bonds");
        assert_eq!(v["amount"], 5.0);
        assert_eq!(v["buying_price"], 2.0);
        assert_eq!(v["transaction_date"], "2024-01-01");
        assert!(v.get("current_price").is_none());
    }

    #[test]
    fn display_matches_detail_block() {
        let r = InvestmentRecord::new(Category::MutualFunds, 3.5, 120.0, d(2023, 7, 9));
        assert_eq!(
            r.to_string(),
            "Investment Type: Mutual Funds\nAmount: 3.50\nBuying Price: 120.00\nTransaction Date: 2023-07-09"
        );
    }

    #[test]
    fn parse_iso_date_is_strict() {
        assert_eq!(parse_iso_date("2024-02-29"), Some(d(2024, 2, 29)));
        assert_eq!(parse_iso_date("2023-02-29"), None);
        assert_eq!(parse_iso_date("2024-1-05"), None);
        assert_eq!(parse_iso_date("2024/01/05"), None);
        assert_eq!(parse_iso_date("01-05-2024"), None);
        assert_eq!(parse_iso_date("2024-01-05T00:00"), None);
    }

    #[test]
    fn parse_real_trims_and_rejects_non_finite() {
        assert_eq!(parse_real(" 12.5 "), Some(12.5));
        assert_eq!(parse_real("1e3"), Some(1000.0));
        assert_eq!(parse_real("inf"), None);
        assert_eq!(parse_real("NaN"), None);
        assert_eq!(parse_real("12,5"), None);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Ledger
// ═══════════════════════════════════════════════════════════════════

mod ledger {
    use super::*;

    #[test]
    fn add_appends_at_end() {
        let mut ledger = Ledger::new();
        ledger.add(rec(Category::Stocks, 1.0, 1.0));
        let r = rec(Category::Bonds, 2.0, 2.0);
        let id = ledger.add(r.clone());
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.all().last().unwrap().record, r);
        assert_eq!(ledger.all().last().unwrap().id, id);
    }

    #[test]
    fn identical_records_are_kept_separately() {
        let mut ledger = Ledger::new();
        let a = ledger.add(rec(Category::Other, 1.0, 1.0));
        let b = ledger.add(rec(Category::Other, 1.0, 1.0));
        assert_eq!(ledger.len(), 2);
        assert_ne!(a, b);
    }

    #[test]
    fn remove_at_keeps_relative_order() {
        let mut ledger = Ledger::from_records(vec![
            rec(Category::Stocks, 1.0, 1.0),
            rec(Category::Bonds, 2.0, 1.0),
            rec(Category::Other, 3.0, 1.0),
            rec(Category::RealEstate, 4.0, 1.0),
        ]);
        let removed = ledger.remove_at(Some(1)).unwrap();
        assert_eq!(removed.record.category, Category::Bonds);
        let amounts: Vec<f64> = ledger.records().map(|r| r.amount).collect();
        assert_eq!(amounts, [1.0, 3.0, 4.0]);
    }

    #[test]
    fn remove_without_selection_is_reported() {
        let mut ledger = Ledger::from_records(vec![rec(Category::Stocks, 1.0, 1.0)]);
        assert!(matches!(ledger.remove_at(None), Err(CoreError::NoSelection)));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn remove_past_end_is_out_of_range() {
        let mut ledger = Ledger::from_records(vec![rec(Category::Stocks, 1.0, 1.0)]);
        assert!(matches!(
            ledger.remove_at(Some(1)),
            Err(CoreError::PositionOutOfRange { position: 1, len: 1 })
        ));
    }

    #[test]
    fn remove_by_id() {
        let mut ledger = Ledger::new();
        let first = ledger.add(rec(Category::Stocks, 1.0, 1.0));
        let second = ledger.add(rec(Category::Bonds, 1.0, 1.0));
        ledger.remove(first).unwrap();
        assert_eq!(ledger.position_of(second), Some(0));
        assert!(matches!(ledger.remove(first), Err(CoreError::RecordNotFound(_))));
    }

    #[test]
    fn replace_discards_previous_contents() {
        let mut ledger = Ledger::from_records(vec![
            rec(Category::Stocks, 1.0, 1.0),
            rec(Category::Bonds, 1.0, 1.0),
        ]);
        let other = Ledger::from_records(vec![rec(Category::Other, 9.0, 9.0)]);
        ledger.replace(other.all().to_vec());
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(0).unwrap().record.category, Category::Other);
    }

    #[test]
    fn empty_ledger() {
        let ledger = Ledger::new();
        assert!(ledger.is_empty());
        assert!(ledger.get(0).is_none());
        assert!(ledger.to_records().is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Filters
// ═══════════════════════════════════════════════════════════════════

mod filters {
    use super::*;

    #[test]
    fn category_filter_parses_labels() {
        assert_eq!("All".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "Real Estate".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::RealEstate)
        );
        assert_eq!(
            "Art".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Unrecognized("Art".into()))
        );
        assert!(matches!("  ".parse::<CategoryFilter>(), Err(CoreError::InvalidFilter(_))));
    }

    #[test]
    fn category_filter_accepts() {
        assert!(CategoryFilter::All.accepts(&Category::Bonds));
        assert!(CategoryFilter::Only(Category::Bonds).accepts(&Category::Bonds));
        assert!(!CategoryFilter::Only(Category::Bonds).accepts(&Category::Stocks));
    }

    #[test]
    fn recency_filter_parses_labels() {
        assert_eq!("All".parse::<RecencyFilter>().unwrap(), RecencyFilter::All);
        assert_eq!("Last 7 Days".parse::<RecencyFilter>().unwrap(), RecencyFilter::Last7Days);
        assert_eq!("Last 30 Days".parse::<RecencyFilter>().unwrap(), RecencyFilter::Last30Days);
        assert_eq!("Last 90 Days".parse::<RecencyFilter>().unwrap(), RecencyFilter::Last90Days);
        assert!("Last Year".parse::<RecencyFilter>().is_err());
    }

    #[test]
    fn recency_display_round_trips() {
        for r in [
            RecencyFilter::All,
            RecencyFilter::Last7Days,
            RecencyFilter::Last30Days,
            RecencyFilter::Last90Days,
        ] {
            assert_eq!(r.to_string().parse::<RecencyFilter>().unwrap(), r);
        }
    }

    #[test]
    fn max_age_days() {
        assert_eq!(RecencyFilter::All.max_age_days(), None);
        assert_eq!(RecencyFilter::Last7Days.max_age_days(), Some(7));
        assert_eq!(RecencyFilter::Last30Days.max_age_days(), Some(30));
        assert_eq!(RecencyFilter::Last90Days.max_age_days(), Some(90));
    }

    #[test]
    fn default_active_filter_matches_all() {
        assert!(ActiveFilter::default().is_match_all());
        assert!(!ActiveFilter::new(CategoryFilter::All, RecencyFilter::Last7Days).is_match_all());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Metrics
// ═══════════════════════════════════════════════════════════════════

mod metrics {
    use super::*;

    fn sample() -> Metrics {
        Metrics {
            record_count: 2,
            total_value: 60.0,
            total_cost: 60.0,
            total_returns: 0.0,
            percentage_returns: 0.0,
            total_amount: 15.0,
            diversification: vec![
                Allocation { category: Category::Stocks, percentage: 200.0 / 3.0 },
                Allocation { category: Category::Bonds, percentage: 100.0 / 3.0 },
                Allocation { category: Category::RealEstate, percentage: 0.0 },
                Allocation { category: Category::MutualFunds, percentage: 0.0 },
                Allocation { category: Category::Other, percentage: 0.0 },
            ],
        }
    }

    #[test]
    fn round2_half_away_from_zero() {
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(33.333_333), 33.33);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn diversification_for_missing_category_is_zero() {
        let m = sample();
        assert_eq!(m.diversification_for(&Category::Unrecognized("Art".into())), 0.0);
        assert_eq!(m.diversification_for(&Category::Other), 0.0);
    }

    #[test]
    fn rounded_rounds_every_share() {
        let m = sample().rounded();
        assert_eq!(m.diversification_for(&Category::Stocks), 66.67);
        assert_eq!(m.diversification_for(&Category::Bonds), 33.33);
    }

    #[test]
    fn display_formats_two_decimals_consistently() {
        let text = sample().to_string();
        assert_eq!(
            text,
            "Portfolio Metrics:\n\
             Total Investment Value: $60.00\n\
             Total Returns: $0.00\n\
             Percentage Returns: 0.00%\n\
             Diversification: Stocks: 66.67%, Bonds: 33.33%, Real Estate: 0.00%, Mutual Funds: 0.00%, Other: 0.00%"
        );
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.data_file, PathBuf::from(DEFAULT_DATA_FILE));
        assert_eq!(s.valuation, ValuationBasis::CostBasis);
        assert!(s.pretty_json);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let s = Settings::from_json_str(r#"{ "data_file": "/tmp/p.json" }"#).unwrap();
        assert_eq!(s.data_file, PathBuf::from("/tmp/p.json"));
        assert_eq!(s.valuation, ValuationBasis::CostBasis);
    }

    #[test]
    fn valuation_from_json() {
        let s = Settings::from_json_str(r#"{ "valuation": "MarkedPrice", "pretty_json": false }"#).unwrap();
        assert_eq!(s.valuation, ValuationBasis::MarkedPrice);
        assert!(!s.pretty_json);
    }

    #[test]
    fn invalid_json_is_deserialization_error() {
        assert!(matches!(
            Settings::from_json_str("{ nope"),
            Err(CoreError::Deserialization(_))
        ));
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let s = Settings::load_from_file(dir.path().join("absent.json")).unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn config_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "data_file": "ledger.json" }"#).unwrap();
        let s = Settings::load_from_file(&path).unwrap();
        assert_eq!(s.data_file, PathBuf::from("ledger.json"));
    }

    #[test]
    fn builders() {
        let s = Settings::default()
            .with_data_file("x.json")
            .with_valuation(ValuationBasis::MarkedPrice);
        assert_eq!(s.data_file, PathBuf::from("x.json"));
        assert_eq!(s.valuation, ValuationBasis::MarkedPrice);
    }
}
