use chrono::NaiveDate;

use crate::model::salary::SalaryStructureEntry;

/// PF switches to a flat amount once basic crosses this threshold.
const PF_BASIC_CEILING: f64 = 15_000.0;
const PF_FLAT: f64 = 1_800.0;
const PF_RATE: f64 = 0.12;

/// ESI applies only up to this gross.
const ESI_GROSS_CEILING: f64 = 21_000.0;
const ESI_RATE: f64 = 0.0075;

/// Professional tax slabs, inclusive upper bounds, evaluated low to high.
const P_TAX_SLABS: [(f64, f64); 4] = [
    (10_000.0, 0.0),
    (15_000.0, 110.0),
    (25_000.0, 130.0),
    (40_000.0, 150.0),
];
const P_TAX_TOP: f64 = 200.0;

/// Parse-float-or-zero policy: non-finite or negative amounts become 0.
fn coerce(amount: f64) -> f64 {
    if amount.is_finite() && amount > 0.0 {
        amount
    } else {
        0.0
    }
}

/// Adjustment keeps its sign; only non-finite input collapses to 0.
fn coerce_signed(amount: f64) -> f64 {
    if amount.is_finite() { amount } else { 0.0 }
}

fn provident_fund(basic: f64) -> f64 {
    if basic <= PF_BASIC_CEILING {
        (basic * PF_RATE).round()
    } else {
        PF_FLAT
    }
}

fn state_insurance(gross: f64) -> f64 {
    if gross <= ESI_GROSS_CEILING {
        (gross * ESI_RATE).ceil()
    } else {
        0.0
    }
}

fn professional_tax(gross: f64) -> f64 {
    for (ceiling, tax) in P_TAX_SLABS {
        if gross <= ceiling {
            return tax;
        }
    }
    P_TAX_TOP
}

/// Forward derivation: gross is ground truth, everything else follows from it.
///
/// `special_allowance` is the remainder after basic/hra/conveyance and may go
/// negative when rounding pushes the three components past gross; it is not
/// clamped. `tds`, `loss_of_pay` and `adjustment` start at 0 and are only ever
/// set by a manual edit through [`reaggregate`].
pub fn breakdown_from_gross(effective_date: NaiveDate, gross: f64) -> SalaryStructureEntry {
    let gross = coerce(gross);

    let basic = (gross * 0.50).round();
    let hra = (basic * 0.50).round();
    let conveyance = (basic * 0.25).round();
    let special_allowance = gross - (basic + hra + conveyance);

    let pf = provident_fund(basic);
    let esi = state_insurance(gross);
    let p_tax = professional_tax(gross);

    let total_deductions = pf + esi + p_tax;

    SalaryStructureEntry {
        effective_date,
        basic,
        conveyance,
        hra,
        special_allowance,
        pf,
        esi,
        p_tax,
        tds: 0.0,
        loss_of_pay: 0.0,
        adjustment: 0.0,
        total_earnings: gross,
        total_deductions,
        net_salary: gross - total_deductions,
        amount: gross,
    }
}

/// Reverse derivation, applied after a manual edit of any component field.
///
/// The four earnings fields are authoritative exactly as the operator typed
/// them; statutory deductions are recomputed from their sum, while the manual
/// deductions (`tds`, `loss_of_pay`, `adjustment`) are carried through.
///
/// Note this is deliberately not the inverse of [`breakdown_from_gross`]:
/// running a forward breakdown and feeding a component back through here need
/// not reproduce the original gross once rounding was involved.
pub fn reaggregate(entry: &SalaryStructureEntry) -> SalaryStructureEntry {
    let basic = coerce(entry.basic);
    let conveyance = coerce(entry.conveyance);
    let hra = coerce(entry.hra);
    let special_allowance = coerce(entry.special_allowance);

    let total_earnings = basic + conveyance + hra + special_allowance;

    let pf = provident_fund(basic);
    let esi = state_insurance(total_earnings);
    let p_tax = professional_tax(total_earnings);

    let tds = coerce(entry.tds);
    let loss_of_pay = coerce(entry.loss_of_pay);
    let adjustment = coerce_signed(entry.adjustment);

    let total_deductions = pf + esi + p_tax + tds + loss_of_pay + adjustment;

    SalaryStructureEntry {
        effective_date: entry.effective_date,
        basic,
        conveyance,
        hra,
        special_allowance,
        pf,
        esi,
        p_tax,
        tds,
        loss_of_pay,
        adjustment,
        total_earnings,
        total_deductions,
        net_salary: total_earnings - total_deductions,
        amount: total_earnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    #[test]
    fn forward_preserves_gross_and_net_identity() {
        for g in (0..=100_000).step_by(97) {
            let entry = breakdown_from_gross(date(), g as f64);
            assert_eq!(entry.total_earnings, g as f64);
            assert_eq!(entry.amount, g as f64);
            assert_eq!(
                entry.net_salary,
                entry.total_earnings - entry.total_deductions,
                "net identity broken at gross={g}"
            );
            assert_eq!(
                entry.total_earnings,
                entry.basic + entry.conveyance + entry.hra + entry.special_allowance,
                "earnings identity broken at gross={g}"
            );
        }
    }

    #[test]
    fn forward_worked_example_20000() {
        let e = breakdown_from_gross(date(), 20_000.0);
        assert_eq!(e.basic, 10_000.0);
        assert_eq!(e.hra, 5_000.0);
        assert_eq!(e.conveyance, 2_500.0);
        assert_eq!(e.special_allowance, 2_500.0);
        assert_eq!(e.pf, 1_200.0);
        assert_eq!(e.esi, 150.0);
        assert_eq!(e.p_tax, 130.0);
        assert_eq!(e.total_deductions, 1_480.0);
        assert_eq!(e.net_salary, 18_520.0);
    }

    #[test]
    fn forward_worked_example_50000() {
        let e = breakdown_from_gross(date(), 50_000.0);
        assert_eq!(e.basic, 25_000.0);
        assert_eq!(e.hra, 12_500.0);
        assert_eq!(e.conveyance, 6_250.0);
        assert_eq!(e.special_allowance, 6_250.0);
        assert_eq!(e.pf, 1_800.0, "flat PF above the basic ceiling");
        assert_eq!(e.esi, 0.0, "no ESI above 21000 gross");
        assert_eq!(e.p_tax, 200.0);
        assert_eq!(e.total_deductions, 2_000.0);
        assert_eq!(e.net_salary, 48_000.0);
    }

    #[test]
    fn pf_flat_branch_activates_above_30000_gross() {
        // basic = gross/2, so the 15000 basic ceiling is crossed past 30000.
        let below = breakdown_from_gross(date(), 30_000.0);
        assert_eq!(below.basic, 15_000.0);
        assert_eq!(below.pf, (15_000.0_f64 * 0.12).round());

        let above = breakdown_from_gross(date(), 30_002.0);
        assert_eq!(above.basic, 15_001.0);
        assert_eq!(above.pf, 1_800.0);
    }

    #[test]
    fn p_tax_slab_edges_are_inclusive() {
        let p_tax = |g: f64| breakdown_from_gross(date(), g).p_tax;
        assert_eq!(p_tax(10_000.0), 0.0);
        assert_eq!(p_tax(10_001.0), 110.0);
        assert_eq!(p_tax(15_000.0), 110.0);
        assert_eq!(p_tax(15_001.0), 130.0);
        assert_eq!(p_tax(25_000.0), 130.0);
        assert_eq!(p_tax(25_001.0), 150.0);
        assert_eq!(p_tax(40_000.0), 150.0);
        assert_eq!(p_tax(40_001.0), 200.0);
    }

    #[test]
    fn esi_rounds_up_and_cuts_off() {
        let e = breakdown_from_gross(date(), 20_001.0);
        assert_eq!(e.esi, (20_001.0_f64 * 0.0075).ceil());
        assert_eq!(breakdown_from_gross(date(), 21_000.0).esi, 158.0);
        assert_eq!(breakdown_from_gross(date(), 21_001.0).esi, 0.0);
    }

    #[test]
    fn invalid_gross_is_treated_as_zero() {
        for bad in [-1.0, -20_000.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let e = breakdown_from_gross(date(), bad);
            assert_eq!(e.total_earnings, 0.0);
            assert_eq!(e.basic, 0.0);
            assert_eq!(e.net_salary, 0.0);
        }
    }

    #[test]
    fn reaggregate_recomputes_totals_from_edited_components() {
        let mut e = breakdown_from_gross(date(), 20_000.0);
        e.tds = 500.0;
        e.loss_of_pay = 645.0;
        e.adjustment = -100.0;

        let r = reaggregate(&e);
        assert_eq!(r.total_earnings, 20_000.0);
        assert_eq!(r.pf, 1_200.0);
        assert_eq!(r.esi, 150.0);
        assert_eq!(r.p_tax, 130.0);
        assert_eq!(r.total_deductions, 1_200.0 + 150.0 + 130.0 + 500.0 + 645.0 - 100.0);
        assert_eq!(r.net_salary, r.total_earnings - r.total_deductions);
        assert_eq!(r.amount, r.total_earnings);
    }

    #[test]
    fn reaggregate_is_idempotent() {
        let mut e = breakdown_from_gross(date(), 37_450.0);
        e.basic = 18_000.0;
        e.tds = 1_000.0;

        let once = reaggregate(&e);
        let twice = reaggregate(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn reverse_uses_total_earnings_for_esi_and_p_tax_slabs() {
        let entry = SalaryStructureEntry {
            basic: 5_000.0,
            conveyance: 1_250.0,
            hra: 2_500.0,
            special_allowance: 1_250.0,
            ..breakdown_from_gross(date(), 0.0)
        };
        let r = reaggregate(&entry);
        assert_eq!(r.total_earnings, 10_000.0);
        assert_eq!(r.esi, 75.0);
        assert_eq!(r.p_tax, 0.0);
    }

    // The two paths are not mathematically inverse of each other; only the
    // reverse path's own invariant is asserted after a round trip.
    #[test]
    fn round_trip_satisfies_reverse_invariant_only() {
        let forward = breakdown_from_gross(date(), 33_333.0);
        let r = reaggregate(&forward);
        assert_eq!(
            r.total_earnings,
            r.basic + r.conveyance + r.hra + r.special_allowance
        );
        assert_eq!(r.net_salary, r.total_earnings - r.total_deductions);
    }
}
