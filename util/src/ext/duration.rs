use std::time::Duration;

pub trait DurationExt {
    /// Clock-style `M:SS`, for totals shown to a person watching a run.
    fn time_fmt(&self) -> String;

    /// Compact unit-suffixed text such as `100ms`, `1.5s` or `1h2m3.5s`.
    ///
    /// Below one second the largest fitting unit out of `ns`, `µs` and `ms` is
    /// used; from one second up the value is split into hours, minutes and
    /// seconds, dropping leading zero parts. Fractions never carry trailing
    /// zeros.
    fn canonical_fmt(&self) -> String;
}

impl DurationExt for Duration {
    fn time_fmt(&self) -> String {
        let minutes = self.as_secs() / 60;
        let seconds = self.as_secs() % 60;
        format!("{}:{:02}", minutes, seconds)
    }

    fn canonical_fmt(&self) -> String {
        let nanos = self.as_nanos();

        if nanos == 0 {
            return "0s".to_string();
        }

        if nanos < 1_000 {
            return format!("{}ns", nanos);
        }

        if nanos < 1_000_000 {
            let (whole, frac) = split_frac(nanos, 3);
            return format!("{}{}µs", whole, frac);
        }

        if nanos < 1_000_000_000 {
            let (whole, frac) = split_frac(nanos, 6);
            return format!("{}{}ms", whole, frac);
        }

        let (secs, frac) = split_frac(nanos, 9);
        let mut res = format!("{}{}s", secs % 60, frac);

        let minutes = secs / 60;
        if minutes > 0 {
            res = format!("{}m{}", minutes % 60, res);

            let hours = minutes / 60;
            if hours > 0 {
                res = format!("{}h{}", hours, res);
            }
        }

        res
    }
}

/// Splits `v` into its integer part and a `.ddd` fraction of `prec` digits,
/// trimmed of trailing zeros (empty when the fraction is zero).
fn split_frac(v: u128, prec: usize) -> (u128, String) {
    let scale = 10u128.pow(prec as u32);
    let frac = v % scale;

    if frac == 0 {
        return (v / scale, String::new());
    }

    let digits = format!("{:0width$}", frac, width = prec);
    (v / scale, format!(".{}", digits.trim_end_matches('0')))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_time_fmt() {
        assert_eq!("0:00", Duration::from_millis(999).time_fmt());
        assert_eq!("1:05", Duration::from_secs(65).time_fmt());
        assert_eq!("61:00", Duration::from_secs(3660).time_fmt());
    }

    #[test]
    fn test_canonical_zero() {
        assert_eq!("0s", Duration::from_secs(0).canonical_fmt());
    }

    #[test]
    fn test_canonical_sub_second() {
        assert_eq!("1ns", Duration::from_nanos(1).canonical_fmt());
        assert_eq!("999ns", Duration::from_nanos(999).canonical_fmt());
        assert_eq!("1µs", Duration::from_nanos(1_000).canonical_fmt());
        assert_eq!("1.5µs", Duration::from_nanos(1_500).canonical_fmt());
        assert_eq!("100ms", Duration::from_millis(100).canonical_fmt());
        assert_eq!("1.234567ms", Duration::from_nanos(1_234_567).canonical_fmt());
        assert_eq!("999.999999ms", Duration::from_nanos(999_999_999).canonical_fmt());
    }

    #[test]
    fn test_canonical_seconds_and_up() {
        assert_eq!("1s", Duration::from_secs(1).canonical_fmt());
        assert_eq!("1.5s", Duration::from_millis(1_500).canonical_fmt());
        assert_eq!("1.000000001s", Duration::from_nanos(1_000_000_001).canonical_fmt());
        assert_eq!("1m0s", Duration::from_secs(60).canonical_fmt());
        assert_eq!("2m5s", Duration::from_secs(125).canonical_fmt());
        assert_eq!("1h0m0s", Duration::from_secs(3_600).canonical_fmt());
        assert_eq!("1h2m3.5s", Duration::from_millis(3_723_500).canonical_fmt());
        assert_eq!("26h0m0s", Duration::from_secs(26 * 3_600).canonical_fmt());
    }
}
