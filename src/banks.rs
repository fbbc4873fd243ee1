//! Catalog of receiver banks accepted by the bank-code filter.
//!
//! The EasySlip API reports `data.receiver.bank.id` as the 3-digit Bank of
//! Thailand institution code, so filters are stored in that form.

/// A Thai bank known to the receiver filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bank {
    /// 3-digit institution code, e.g. `"004"`.
    pub code: &'static str,
    /// Short abbreviation, e.g. `"KBANK"`.
    pub abbreviation: &'static str,
    /// Thai display name.
    pub name_th: &'static str,
}

/// All banks selectable in the receiver-bank filter.
pub const BANKS: &[Bank] = &[
    Bank { code: "002", abbreviation: "BBL", name_th: "ธนาคารกรุงเทพ" },
    Bank { code: "004", abbreviation: "KBANK", name_th: "ธนาคารกสิกรไทย" },
    Bank { code: "006", abbreviation: "KTB", name_th: "ธนาคารกรุงไทย" },
    Bank { code: "011", abbreviation: "TTB", name_th: "ธนาคารทหารไทยธนชาต" },
    Bank { code: "014", abbreviation: "SCB", name_th: "ธนาคารไทยพาณิชย์" },
    Bank { code: "022", abbreviation: "CIMBT", name_th: "ธนาคารซีไอเอ็มบีไทย" },
    Bank { code: "024", abbreviation: "UOBT", name_th: "ธนาคารยูโอบี" },
    Bank { code: "025", abbreviation: "BAY", name_th: "ธนาคารกรุงศรีอยุธยา" },
    Bank { code: "030", abbreviation: "GSB", name_th: "ธนาคารออมสิน" },
    Bank { code: "033", abbreviation: "GHB", name_th: "ธนาคารอาคารสงเคราะห์" },
    Bank { code: "034", abbreviation: "BAAC", name_th: "ธนาคารเพื่อการเกษตรและสหกรณ์การเกษตร" },
    Bank { code: "035", abbreviation: "EXIM", name_th: "ธนาคารเพื่อการส่งออกและนำเข้าแห่งประเทศไทย" },
    Bank { code: "067", abbreviation: "TISCO", name_th: "ธนาคารทิสโก้" },
    Bank { code: "069", abbreviation: "KKP", name_th: "ธนาคารเกียรตินาคินภัทร" },
    Bank { code: "070", abbreviation: "ICBCT", name_th: "ธนาคารไอซีบีซี (ไทย)" },
    Bank { code: "071", abbreviation: "TCD", name_th: "ธนาคารไทยเครดิตเพื่อรายย่อย" },
    Bank { code: "073", abbreviation: "LHFG", name_th: "ธนาคารแลนด์ แอนด์ เฮ้าส์" },
    Bank {
        code: "098",
        abbreviation: "SME",
        name_th: "ธนาคารพัฒนาวิสาหกิจขนาดกลางและขนาดย่อยแห่งประเทศไทย",
    },
];

/// Look up a bank by its exact 3-digit code.
#[must_use]
pub fn by_code(code: &str) -> Option<&'static Bank> {
    BANKS.iter().find(|bank| bank.code == code)
}

/// Resolve a configured filter value to the code compared against responses.
///
/// Abbreviations (any case) map to their catalog code. Anything else, codes
/// outside the catalog included, is returned unchanged.
#[must_use]
pub fn resolve_code(value: &str) -> String {
    let trimmed = value.trim();
    BANKS
        .iter()
        .find(|bank| bank.abbreviation.eq_ignore_ascii_case(trimmed))
        .map_or_else(|| value.to_string(), |bank| bank.code.to_string())
}
