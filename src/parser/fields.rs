use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Labels that close a field when the descriptor names none of its own.
pub const DEFAULT_STOPS: &[&str] = &["事實", "理由", "法令依據", "繳款方式", "注意事項"];

const RESPONDENT_STOPS: &[&str] = &[
    "營利事業統一編號",
    "統一號碼",
    "地址",
    "代表人",
    "主旨",
    "事實",
    "三、",
];
const REGISTRATION_STOPS: &[&str] = &["地址", "代表人", "主旨", "事實"];

/// Output slot a label feeds. Alias slots only exist until reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    FilingDate,
    DocumentNumber,
    Respondent,
    RespondentAlias,
    RegistrationNumber,
    RegistrationAlias,
    Representative,
    Address,
    PenaltyPeriod,
    Subject,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub label: &'static str,
    pub slot: Slot,
    /// Labels expected to follow this one. Empty means [`DEFAULT_STOPS`].
    pub stops: &'static [&'static str],
    /// Placeholder values that mean "not applicable".
    pub sentinels: &'static [&'static str],
}

/// Processed top to bottom; alias order is the reconciliation precedence.
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        label: "發文日期",
        slot: Slot::FilingDate,
        stops: &[
            "發文字號",
            "速別",
            "密等",
            "附件",
            "相對人",
            "受處分人",
            "營利事業統一編號",
            "主旨",
            "事實",
        ],
        sentinels: &[],
    },
    FieldSpec {
        label: "發文字號",
        slot: Slot::DocumentNumber,
        stops: &[
            "速別",
            "密等",
            "附件",
            "相對人",
            "受處分人",
            "營利事業統一編號",
            "主旨",
            "事實",
        ],
        sentinels: &[],
    },
    FieldSpec {
        label: "受處分人",
        slot: Slot::Respondent,
        stops: RESPONDENT_STOPS,
        sentinels: &[],
    },
    FieldSpec {
        label: "受處分人姓名或名稱",
        slot: Slot::RespondentAlias,
        stops: RESPONDENT_STOPS,
        sentinels: &[],
    },
    FieldSpec {
        label: "受處分人名稱",
        slot: Slot::RespondentAlias,
        stops: RESPONDENT_STOPS,
        sentinels: &[],
    },
    FieldSpec {
        label: "相對人",
        slot: Slot::RespondentAlias,
        stops: &[
            "公司代表人",
            "出生年月日",
            "性別",
            "身分證",
            "地址",
            "主旨",
            "事實",
            "三、",
        ],
        sentinels: &["略"],
    },
    FieldSpec {
        label: "受裁罰之對象",
        slot: Slot::RespondentAlias,
        stops: RESPONDENT_STOPS,
        sentinels: &[],
    },
    FieldSpec {
        label: "營利事業統一編號",
        slot: Slot::RegistrationNumber,
        stops: REGISTRATION_STOPS,
        sentinels: &["略"],
    },
    FieldSpec {
        label: "統一號碼",
        slot: Slot::RegistrationAlias,
        stops: REGISTRATION_STOPS,
        sentinels: &["略"],
    },
    FieldSpec {
        label: "代表人或管理人姓名",
        slot: Slot::Representative,
        stops: &["地址", "身分證", "主旨", "事實"],
        sentinels: &["略"],
    },
    FieldSpec {
        label: "地址",
        slot: Slot::Address,
        stops: &["代表人", "主旨", "事實"],
        sentinels: &["略", "同上"],
    },
    FieldSpec {
        label: "裁罰時間",
        slot: Slot::PenaltyPeriod,
        stops: &["受處分人", "營利事業統一編號", "主旨", "事實", "二、"],
        sentinels: &[],
    },
    FieldSpec {
        label: "主旨",
        slot: Slot::Subject,
        stops: &["事實", "理由", "法令依據"],
        sentinels: &[],
    },
];

/// Output keys, in serialization order.
pub const FIELD_KEYS: [&str; 9] = [
    "發文日期",
    "發文字號",
    "受處分人",
    "營利事業統一編號",
    "代表人或管理人姓名",
    "地址",
    "裁罰時間",
    "主旨",
    "罰鍰金額",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    #[serde(rename = "發文日期")]
    pub filing_date: Option<String>,
    #[serde(rename = "發文字號")]
    pub document_number: Option<String>,
    #[serde(rename = "受處分人")]
    pub respondent: Option<String>,
    #[serde(rename = "營利事業統一編號")]
    pub registration_number: Option<String>,
    #[serde(rename = "代表人或管理人姓名")]
    pub representative: Option<String>,
    #[serde(rename = "地址")]
    pub address: Option<String>,
    #[serde(rename = "裁罰時間")]
    pub penalty_period: Option<String>,
    #[serde(rename = "主旨")]
    pub subject: Option<String>,
    #[serde(rename = "罰鍰金額")]
    pub penalty_amount: Option<String>,
}

impl ExtractedFields {
    /// Values paired with [`FIELD_KEYS`].
    pub fn values(&self) -> [Option<&str>; 9] {
        [
            self.filing_date.as_deref(),
            self.document_number.as_deref(),
            self.respondent.as_deref(),
            self.registration_number.as_deref(),
            self.representative.as_deref(),
            self.address.as_deref(),
            self.penalty_period.as_deref(),
            self.subject.as_deref(),
            self.penalty_amount.as_deref(),
        ]
    }
}

/// A [`FieldSpec`] with its patterns compiled.
struct Matcher {
    spec: FieldSpec,
    label: Regex,
    stop_head: Regex,
    stop_any: Regex,
    line: Regex,
}

impl Matcher {
    fn new(spec: FieldSpec) -> Self {
        let stops = if spec.stops.is_empty() {
            DEFAULT_STOPS
        } else {
            spec.stops
        };
        let alternation = stops
            .iter()
            .map(|s| regex::escape(s))
            .collect::<Vec<_>>()
            .join("|");
        let label = regex::escape(spec.label);

        Matcher {
            spec,
            label: Regex::new(&format!(r"{label}[：:]")).unwrap(),
            stop_head: Regex::new(&format!(r"^(?:{alternation})")).unwrap(),
            stop_any: Regex::new(&format!(r"(?:{alternation})")).unwrap(),
            line: Regex::new(&format!(r"{label}[：:]\s*([^\n]*)")).unwrap(),
        }
    }

    /// Primary attempt, then the rest-of-line fallback.
    fn find(&self, text: &str) -> Option<String> {
        self.up_to_stop(text)
            .and_then(|raw| self.clean(raw))
            .or_else(|| {
                let caps = self.line.captures(text)?;
                self.clean(caps.get(1)?.as_str())
            })
    }

    /// Shortest colon-free, newline-free run after the label that ends at a
    /// stop label or at the end of the text. Later label occurrences are
    /// tried when an earlier one runs into a colon or newline first.
    fn up_to_stop<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.label.find_iter(text).find_map(|m| {
            let body = text[m.end()..].trim_start();
            let mut pos = 0;
            loop {
                let tail = &body[pos..];
                if tail.is_empty() || tail == "\n" || self.stop_head.is_match(tail) {
                    return Some(&body[..pos]);
                }
                let c = tail.chars().next()?;
                if c == '：' || c == '\n' {
                    return None;
                }
                pos += c.len_utf8();
            }
        })
    }

    fn clean(&self, raw: &str) -> Option<String> {
        let value = raw.trim();
        let value = value.strip_suffix('。').unwrap_or(value);
        let value = match self.stop_any.find(value) {
            Some(m) => &value[..m.start()],
            None => value,
        };
        let value = value.trim();
        if value.is_empty() || self.spec.sentinels.contains(&value) {
            None
        } else {
            Some(value.to_string())
        }
    }
}

static MATCHERS: LazyLock<Vec<Matcher>> =
    LazyLock::new(|| FIELDS.iter().copied().map(Matcher::new).collect());

/// Run the built-in field table over plain text. The penalty amount is
/// left unset; see `parser::penalty`.
pub fn extract_fields(text: &str) -> ExtractedFields {
    collect(&MATCHERS, text)
}

fn collect(matchers: &[Matcher], text: &str) -> ExtractedFields {
    let mut out = ExtractedFields::default();
    let mut respondent_alias: Option<String> = None;
    let mut registration_alias: Option<String> = None;

    for matcher in matchers {
        let value = matcher.find(text);
        match matcher.spec.slot {
            Slot::FilingDate => out.filing_date = value,
            Slot::DocumentNumber => out.document_number = value,
            Slot::Respondent => out.respondent = value,
            Slot::RespondentAlias => respondent_alias = respondent_alias.or(value),
            Slot::RegistrationNumber => out.registration_number = value,
            Slot::RegistrationAlias => registration_alias = registration_alias.or(value),
            Slot::Representative => out.representative = value,
            Slot::Address => out.address = value,
            Slot::PenaltyPeriod => out.penalty_period = value,
            Slot::Subject => out.subject = value,
        }
    }

    out.respondent = out.respondent.or(respondent_alias);
    out.registration_number = out.registration_number.or(registration_alias);
    out
}
