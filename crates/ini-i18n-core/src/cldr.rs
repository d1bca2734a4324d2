//! CLDR cardinal plural rules, see
//! <https://www.unicode.org/cldr/charts/latest/supplemental/language_plural_rules.html>.

use crate::PluralForm::{Few, Many, One, Other, Two, Zero};
use crate::{LanguageTag, Operands, PluralRule, PluralRules};

pub(crate) fn register(rules: &mut PluralRules) {
    for (ids, rule) in GROUPS {
        for id in ids.split_whitespace() {
            if let Ok(tag) = LanguageTag::parse(id) {
                rules.insert(&tag, *rule);
            }
        }
    }
}

const GROUPS: &[(&str, PluralRule)] = &[
    (
        "bm bo dz hnj id ig ii in ja jbo jv jw kde kea km ko lkt lo ms my nqo osa sah ses sg \
         su th to tpi vi wo yo yue zh",
        PluralRule {
            forms: &[Other],
            select: |_| Other,
        },
    ),
    (
        "am as bn doi fa gu hi kn pcm zu",
        PluralRule {
            forms: &[One, Other],
            select: |ops| {
                if ops.i == 0 || ops.n == 1.0 {
                    One
                } else {
                    Other
                }
            },
        },
    ),
    (
        "ff hy kab",
        PluralRule {
            forms: &[One, Other],
            select: |ops| if ops.i <= 1 { One } else { Other },
        },
    ),
    (
        "fr",
        PluralRule {
            forms: &[One, Many, Other],
            select: |ops| {
                if ops.i <= 1 {
                    One
                } else if is_millions(ops) {
                    Many
                } else {
                    Other
                }
            },
        },
    ),
    (
        "pt",
        PluralRule {
            forms: &[One, Many, Other],
            select: |ops| {
                if ops.i <= 1 {
                    One
                } else if is_millions(ops) {
                    Many
                } else {
                    Other
                }
            },
        },
    ),
    (
        "ast de en et fi fy gl ia io lij nl sc scn sv sw ur yi",
        PluralRule {
            forms: &[One, Other],
            select: |ops| {
                if ops.i == 1 && ops.v == 0 {
                    One
                } else {
                    Other
                }
            },
        },
    ),
    (
        "ca it pt-PT vec",
        PluralRule {
            forms: &[One, Many, Other],
            select: |ops| {
                if ops.i == 1 && ops.v == 0 {
                    One
                } else if is_millions(ops) {
                    Many
                } else {
                    Other
                }
            },
        },
    ),
    (
        "es",
        PluralRule {
            forms: &[One, Many, Other],
            select: |ops| {
                if ops.n == 1.0 {
                    One
                } else if is_millions(ops) {
                    Many
                } else {
                    Other
                }
            },
        },
    ),
    (
        "si",
        PluralRule {
            forms: &[One, Other],
            select: |ops| {
                if ops.n == 0.0 || ops.n == 1.0 || (ops.i == 0 && ops.f == 1) {
                    One
                } else {
                    Other
                }
            },
        },
    ),
    (
        "ak bho guw ln mg nso pa ti wa",
        PluralRule {
            forms: &[One, Other],
            select: |ops| if n_in(ops.n, 0, 1) { One } else { Other },
        },
    ),
    (
        "tzm",
        PluralRule {
            forms: &[One, Other],
            select: |ops| {
                if n_in(ops.n, 0, 1) || n_in(ops.n, 11, 99) {
                    One
                } else {
                    Other
                }
            },
        },
    ),
    (
        "af an asa az bal bem bez bg brx ce cgg chr ckb dv ee el eo eu fo fur gsw ha haw hu \
         jgo jmc ka kaj kcg kk kkj kl ks ksb ku ky lb lg mas mgo ml mn mr nah nb nd ne nn nnh \
         no nr ny nyn om or os pap ps rm rof rwk saq sd sdh seh sn so sq ss ssy st syr ta te \
         teo tig tk tn tr ts ug uz ve vo vun wae xh xog",
        PluralRule {
            forms: &[One, Other],
            select: |ops| if ops.n == 1.0 { One } else { Other },
        },
    ),
    (
        "da",
        PluralRule {
            forms: &[One, Other],
            select: |ops| {
                if ops.n == 1.0 || (ops.t != 0 && ops.i <= 1) {
                    One
                } else {
                    Other
                }
            },
        },
    ),
    (
        "is",
        PluralRule {
            forms: &[One, Other],
            select: |ops| {
                if (ops.t == 0 && ops.i % 10 == 1 && ops.i % 100 != 11)
                    || (ops.t % 10 == 1 && ops.t % 100 != 11)
                {
                    One
                } else {
                    Other
                }
            },
        },
    ),
    (
        "mk",
        PluralRule {
            forms: &[One, Other],
            select: |ops| {
                if (ops.v == 0 && ops.i % 10 == 1 && ops.i % 100 != 11)
                    || (ops.f % 10 == 1 && ops.f % 100 != 11)
                {
                    One
                } else {
                    Other
                }
            },
        },
    ),
    (
        "ceb fil tl",
        PluralRule {
            forms: &[One, Other],
            select: |ops| {
                if (ops.v == 0 && ops.i <= 3 && ops.i >= 1)
                    || (ops.v == 0 && !matches!(ops.i % 10, 4 | 6 | 9))
                    || (ops.v != 0 && !matches!(ops.f % 10, 4 | 6 | 9))
                {
                    One
                } else {
                    Other
                }
            },
        },
    ),
    (
        "lv prg",
        PluralRule {
            forms: &[Zero, One, Other],
            select: |ops| {
                let n10 = ops.n % 10.0;
                let n100 = ops.n % 100.0;
                if n10 == 0.0 || n_in(n100, 11, 19) || (ops.v == 2 && in_range(ops.f % 100, 11, 19))
                {
                    Zero
                } else if (n10 == 1.0 && n100 != 11.0)
                    || (ops.v == 2 && ops.f % 10 == 1 && ops.f % 100 != 11)
                    || (ops.v != 2 && ops.f % 10 == 1)
                {
                    One
                } else {
                    Other
                }
            },
        },
    ),
    (
        "lag",
        PluralRule {
            forms: &[Zero, One, Other],
            select: |ops| {
                if ops.n == 0.0 {
                    Zero
                } else if ops.i <= 1 {
                    One
                } else {
                    Other
                }
            },
        },
    ),
    (
        "ksh",
        PluralRule {
            forms: &[Zero, One, Other],
            select: |ops| {
                if ops.n == 0.0 {
                    Zero
                } else if ops.n == 1.0 {
                    One
                } else {
                    Other
                }
            },
        },
    ),
    (
        "iu naq sat se sma smi smj smn sms",
        PluralRule {
            forms: &[One, Two, Other],
            select: |ops| {
                if ops.n == 1.0 {
                    One
                } else if ops.n == 2.0 {
                    Two
                } else {
                    Other
                }
            },
        },
    ),
    (
        "he iw",
        PluralRule {
            forms: &[One, Two, Other],
            select: |ops| {
                if (ops.i == 1 && ops.v == 0) || (ops.i == 0 && ops.v != 0) {
                    One
                } else if ops.i == 2 && ops.v == 0 {
                    Two
                } else {
                    Other
                }
            },
        },
    ),
    (
        "shi",
        PluralRule {
            forms: &[One, Few, Other],
            select: |ops| {
                if ops.i == 0 || ops.n == 1.0 {
                    One
                } else if n_in(ops.n, 2, 10) {
                    Few
                } else {
                    Other
                }
            },
        },
    ),
    (
        "mo ro",
        PluralRule {
            forms: &[One, Few, Other],
            select: |ops| {
                if ops.i == 1 && ops.v == 0 {
                    One
                } else if ops.v != 0 || ops.n == 0.0 || (ops.n != 1.0 && n_in(ops.n % 100.0, 1, 19)) {
                    Few
                } else {
                    Other
                }
            },
        },
    ),
    (
        "bs hr sh sr",
        PluralRule {
            forms: &[One, Few, Other],
            select: |ops| {
                if (ops.v == 0 && ops.i % 10 == 1 && ops.i % 100 != 11)
                    || (ops.f % 10 == 1 && ops.f % 100 != 11)
                {
                    One
                } else if (ops.v == 0
                    && in_range(ops.i % 10, 2, 4)
                    && !in_range(ops.i % 100, 12, 14))
                    || (in_range(ops.f % 10, 2, 4) && !in_range(ops.f % 100, 12, 14))
                {
                    Few
                } else {
                    Other
                }
            },
        },
    ),
    (
        "gd",
        PluralRule {
            forms: &[One, Two, Few, Other],
            select: |ops| {
                if ops.n == 1.0 || ops.n == 11.0 {
                    One
                } else if ops.n == 2.0 || ops.n == 12.0 {
                    Two
                } else if n_in(ops.n, 3, 10) || n_in(ops.n, 13, 19) {
                    Few
                } else {
                    Other
                }
            },
        },
    ),
    (
        "sl",
        PluralRule {
            forms: &[One, Two, Few, Other],
            select: |ops| {
                if ops.v == 0 && ops.i % 100 == 1 {
                    One
                } else if ops.v == 0 && ops.i % 100 == 2 {
                    Two
                } else if (ops.v == 0 && in_range(ops.i % 100, 3, 4)) || ops.v != 0 {
                    Few
                } else {
                    Other
                }
            },
        },
    ),
    (
        "dsb hsb",
        PluralRule {
            forms: &[One, Two, Few, Other],
            select: |ops| {
                if (ops.v == 0 && ops.i % 100 == 1) || ops.f % 100 == 1 {
                    One
                } else if (ops.v == 0 && ops.i % 100 == 2) || ops.f % 100 == 2 {
                    Two
                } else if (ops.v == 0 && in_range(ops.i % 100, 3, 4)) || in_range(ops.f % 100, 3, 4)
                {
                    Few
                } else {
                    Other
                }
            },
        },
    ),
    (
        "cs sk",
        PluralRule {
            forms: &[One, Few, Many, Other],
            select: |ops| {
                if ops.i == 1 && ops.v == 0 {
                    One
                } else if in_range(ops.i, 2, 4) && ops.v == 0 {
                    Few
                } else if ops.v != 0 {
                    Many
                } else {
                    Other
                }
            },
        },
    ),
    (
        "pl",
        PluralRule {
            forms: &[One, Few, Many, Other],
            select: |ops| {
                if ops.i == 1 && ops.v == 0 {
                    One
                } else if ops.v == 0 && in_range(ops.i % 10, 2, 4) && !in_range(ops.i % 100, 12, 14)
                {
                    Few
                } else if ops.v == 0
                    && ((ops.i != 1 && ops.i % 10 <= 1)
                        || in_range(ops.i % 10, 5, 9)
                        || in_range(ops.i % 100, 12, 14))
                {
                    Many
                } else {
                    Other
                }
            },
        },
    ),
    (
        "be",
        PluralRule {
            forms: &[One, Few, Many, Other],
            select: |ops| {
                let n10 = ops.n % 10.0;
                let n100 = ops.n % 100.0;
                if n10 == 1.0 && n100 != 11.0 {
                    One
                } else if n_in(n10, 2, 4) && !n_in(n100, 12, 14) {
                    Few
                } else if n10 == 0.0 || n_in(n10, 5, 9) || n_in(n100, 11, 14) {
                    Many
                } else {
                    Other
                }
            },
        },
    ),
    (
        "lt",
        PluralRule {
            forms: &[One, Few, Many, Other],
            select: |ops| {
                let n10 = ops.n % 10.0;
                let n100 = ops.n % 100.0;
                if n10 == 1.0 && !n_in(n100, 11, 19) {
                    One
                } else if n_in(n10, 2, 9) && !n_in(n100, 11, 19) {
                    Few
                } else if ops.f != 0 {
                    Many
                } else {
                    Other
                }
            },
        },
    ),
    (
        "ru uk",
        PluralRule {
            forms: &[One, Few, Many, Other],
            select: |ops| {
                if ops.v != 0 {
                    Other
                } else if ops.i % 10 == 1 && ops.i % 100 != 11 {
                    One
                } else if in_range(ops.i % 10, 2, 4) && !in_range(ops.i % 100, 12, 14) {
                    Few
                } else {
                    Many
                }
            },
        },
    ),
    (
        "mt",
        PluralRule {
            forms: &[One, Two, Few, Many, Other],
            select: |ops| {
                let n100 = ops.n % 100.0;
                if ops.n == 1.0 {
                    One
                } else if ops.n == 2.0 {
                    Two
                } else if ops.n == 0.0 || n_in(n100, 3, 10) {
                    Few
                } else if n_in(n100, 11, 19) {
                    Many
                } else {
                    Other
                }
            },
        },
    ),
    (
        "br",
        PluralRule {
            forms: &[One, Two, Few, Many, Other],
            select: |ops| {
                let n10 = ops.n % 10.0;
                let n100 = ops.n % 100.0;
                if n10 == 1.0 && !f_any(n100, &[11, 71, 91]) {
                    One
                } else if n10 == 2.0 && !f_any(n100, &[12, 72, 92]) {
                    Two
                } else if (n_in(n10, 3, 4) || n10 == 9.0)
                    && !n_in(n100, 10, 19)
                    && !n_in(n100, 70, 79)
                    && !n_in(n100, 90, 99)
                {
                    Few
                } else if ops.n != 0.0 && ops.n % 1_000_000.0 == 0.0 {
                    Many
                } else {
                    Other
                }
            },
        },
    ),
    (
        "ga",
        PluralRule {
            forms: &[One, Two, Few, Many, Other],
            select: |ops| {
                if ops.n == 1.0 {
                    One
                } else if ops.n == 2.0 {
                    Two
                } else if n_in(ops.n, 3, 6) {
                    Few
                } else if n_in(ops.n, 7, 10) {
                    Many
                } else {
                    Other
                }
            },
        },
    ),
    (
        "gv",
        PluralRule {
            forms: &[One, Two, Few, Many, Other],
            select: |ops| {
                if ops.v == 0 && ops.i % 10 == 1 {
                    One
                } else if ops.v == 0 && ops.i % 10 == 2 {
                    Two
                } else if ops.v == 0 && matches!(ops.i % 100, 0 | 20 | 40 | 60 | 80) {
                    Few
                } else if ops.v != 0 {
                    Many
                } else {
                    Other
                }
            },
        },
    ),
    (
        "ar ars",
        PluralRule {
            forms: &[Zero, One, Two, Few, Many, Other],
            select: |ops| {
                let n100 = ops.n % 100.0;
                if ops.n == 0.0 {
                    Zero
                } else if ops.n == 1.0 {
                    One
                } else if ops.n == 2.0 {
                    Two
                } else if n_in(n100, 3, 10) {
                    Few
                } else if n_in(n100, 11, 99) {
                    Many
                } else {
                    Other
                }
            },
        },
    ),
    (
        "cy",
        PluralRule {
            forms: &[Zero, One, Two, Few, Many, Other],
            select: |ops| {
                if ops.n == 0.0 {
                    Zero
                } else if ops.n == 1.0 {
                    One
                } else if ops.n == 2.0 {
                    Two
                } else if ops.n == 3.0 {
                    Few
                } else if ops.n == 6.0 {
                    Many
                } else {
                    Other
                }
            },
        },
    ),
];

fn in_range(value: u64, from: u64, to: u64) -> bool {
    from <= value && value <= to
}

/// `n = from..to` in CLDR syntax only matches integral values.
fn n_in(value: f64, from: u64, to: u64) -> bool {
    value.fract() == 0.0 && from as f64 <= value && value <= to as f64
}

fn f_any(value: f64, candidates: &[u64]) -> bool {
    candidates.iter().any(|candidate| value == *candidate as f64)
}

fn is_millions(ops: &Operands) -> bool {
    ops.v == 0 && ops.i != 0 && ops.i % 1_000_000 == 0
}
