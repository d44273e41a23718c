#[cfg(test)]
mod tests {
    use crate::holdings::classifier::classify;
    use crate::holdings::OptionType;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn compact_date_strike_form_is_recognized() {
        let details = classify("NDX US 12/20/24 C26150", "").unwrap();
        assert_eq!(details.option_type, OptionType::Call);
        assert_eq!(details.strike_price, dec!(26150));
        assert_eq!(details.expiration_raw, "12/20/24");
        assert_eq!(details.expiration_date, Some(date(2024, 12, 20)));
    }

    #[test]
    fn compact_form_put_marker() {
        let details = classify("", "SPX US 01/17/25 P4800").unwrap();
        assert_eq!(details.option_type, OptionType::Put);
        assert_eq!(details.strike_price, dec!(4800));
    }

    #[test]
    fn slash_leg_form_is_recognized() {
        let details = classify("C/QQQ FLEX OPT 610.3 EXP 2026-03-06", "").unwrap();
        assert_eq!(details.option_type, OptionType::Call);
        assert_eq!(details.strike_price, dec!(610.3));
        assert_eq!(details.expiration_raw, "2026-03-06");
        assert_eq!(details.expiration_date, Some(date(2026, 3, 6)));
    }

    #[test]
    fn slash_leg_form_matches_in_description_case_insensitively() {
        let details = classify("GPIQ_OPT1", "p/qqq flex 595.5 exp 2026-03-06").unwrap();
        assert_eq!(details.option_type, OptionType::Put);
        assert_eq!(details.strike_price, dec!(595.5));
    }

    #[test]
    fn occ_packed_form_is_recognized() {
        let details = classify("4NDX 260320C01947250", "").unwrap();
        assert_eq!(details.option_type, OptionType::Call);
        assert_eq!(details.strike_price, dec!(19472.50));
        assert_eq!(details.expiration_raw, "2026-03-20");
        assert_eq!(details.expiration_date, Some(date(2026, 3, 20)));
    }

    #[test]
    fn occ_packed_form_only_matches_the_ticker() {
        // The packed pattern must not fire on description text.
        assert!(classify("AAPL", "123456C12345678").is_none());
    }

    #[test]
    fn plain_equity_ticker_is_not_an_option() {
        assert!(classify("AAPL", "APPLE INC").is_none());
        assert!(classify("", "").is_none());
    }

    #[test]
    fn cascade_priority_prefers_compact_form_over_occ() {
        // Ticker carries an OCC-packed token while the description carries a
        // compact date-strike leg. Family 1 wins by contract.
        let details = classify("4NDX260320C01947250", "NDX US 12/20/24 C26150").unwrap();
        assert_eq!(details.strike_price, dec!(26150));
        assert_eq!(details.expiration_raw, "12/20/24");
    }

    #[test]
    fn zero_strike_is_rejected() {
        assert!(classify("NDX US 12/20/24 C0", "").is_none());
        assert!(classify("4NDX 260320C00000000", "").is_none());
    }

    #[test]
    fn occ_with_invalid_calendar_date_keeps_raw_expiration() {
        // Month 13 does not parse, but the row is still an option and the
        // synthesized text is retained for the "Unknown Date" bucket.
        let details = classify("4NDX 261340C00500000", "").unwrap();
        assert_eq!(details.expiration_date, None);
        assert_eq!(details.expiration_raw, "2026-13-40");
        assert_eq!(details.strike_price, dec!(5000));
    }

    #[test]
    fn garbage_text_never_panics() {
        assert!(classify("!!##$$", "\u{fffd}\u{fffd}\u{fffd}").is_none());
        assert!(classify("C/", "EXP").is_none());
    }
}
