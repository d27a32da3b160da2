//! Accident card ("karta wypadku") PDF generation.
//!
//! The statutory card is rendered from a fixed textual template: values are
//! substituted, lines are word-wrapped to the page width, and the result is
//! emitted as text content streams with a Helvetica font carrying a
//! Differences encoding for Polish diacritics.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};
use serde::{Deserialize, Serialize};

use super::PdfError;
use crate::models::Document as DocumentModel;

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 40.0;
const FONT_SIZE: f32 = 11.0;
const LINE_SPACING: f32 = FONT_SIZE * 1.45;
// Average Helvetica glyph is roughly half an em wide
const MAX_LINE_CHARS: usize = ((PAGE_WIDTH - 2.0 * MARGIN) / (FONT_SIZE * 0.5)) as usize;
const LINES_PER_PAGE: usize = ((PAGE_HEIGHT - 2.0 * MARGIN) / LINE_SPACING) as usize;

const CARD_TEMPLATE: &str = "\
DANE IDENTYFIKACYJNE PŁATNIKA SKŁADEK
Imię i nazwisko lub nazwa: {payer_name}
Adres siedziby: {payer_address}
NIP: {payer_nip}
REGON: {payer_regon}
PESEL: {payer_pesel}
Dokument tożsamości (dowód osobisty lub paszport): {payer_identity_document}
Rodzaj dokumentu: {payer_document_type}
Seria i numer: {payer_document_series}

DANE IDENTYFIKACYJNE POSZKODOWANEGO
Imię i nazwisko: {victim_name}
PESEL: {victim_pesel}
Dokument tożsamości (dowód osobisty lub paszport): {victim_identity_document}
Rodzaj dokumentu: {victim_document_type}
Seria i numer: {victim_document_series}
Data i miejsce urodzenia: {victim_birth_details}
Adres zamieszkania: {victim_address}

Tytuł ubezpieczenia wypadkowego: {insurance_title}
(wymienić numer pozycji i pełny tytuł ubezpieczenia zgodnie z art. 3 ust. 3 ustawy z 30.10.2002 r. o ubezpieczeniu społecznym z tytułu wypadków przy pracy i chorób zawodowych, Dz.U. 2019 poz. 1205 z późn. zm.)
{insurance_title_additional}

Rodzaj wykonywanej działalności: {activity_type}

INFORMACJE O WYPADKU
Data zgłoszenia oraz imię i nazwisko osoby zgłaszającej wypadek: {report_details}
Informacje dotyczące okoliczności, przyczyn, czasu i miejsca wypadku:
{accident_info}

Data wypadku: {accident_date}
Skutek wypadku:
{accident_effect}

ŚWIADKOWIE
a) Imię i nazwisko: {witness_name}
Adres zamieszkania: {witness_address}

USTALENIA DOTYCZĄCE WYPADKU
Wypadek jest / nie jest wypadkiem przy pracy określonym w art. 3 ustawy z dnia 30 października 2002 r. o ubezpieczeniu społecznym z tytułu wypadków przy pracy i chorób zawodowych
{work_accident_decision}
(uzasadnić w przypadku nieuznania)
{work_accident_justification}

Stwierdzono, że wyłączną przyczyną wypadku było udowodnione naruszenie przez poszkodowanego przepisów bhp:
{bhp_violation_decision}
(podać dowody w przypadku stwierdzenia)
{bhp_violation_evidence}

Stwierdzono, że poszkodowany, będąc w stanie nietrzeźwości lub pod wpływem substancji odurzających, przyczynił się do wypadku:
{intoxication_decision}
(podać dowody, przy odmowie badania opisać ten fakt)
{intoxication_evidence}

POZOSTAŁE INFORMACJE
Poszkodowanego (lub członka rodziny) zapoznano z treścią karty oraz pouczono o prawie zgłaszania uwag i zastrzeżeń.
Imię i nazwisko poszkodowanego / członka rodziny: {acknowledged_person}
Kartę sporządzono dnia: {card_created_date}
Podpis sporządzającego: {card_created_signature}

ZAKŁAD UBEZPIECZEŃ SPOŁECZNYCH
a) Nazwa podmiotu zobowiązanego do sporządzenia karty: {zus_entity_name}
b) Imię i nazwisko osoby sporządzającej: {zus_officer_name}
Podpis: {zus_officer_signature}

Przeszkody lub trudności uniemożliwiające sporządzenie karty w terminie 14 dni
{obstacles}

Kartę odebrano w dniu {card_received_date}

Załączniki
{attachments}
";

const DEFAULT_ACTIVITY_TYPE: &str = "wykonywanie zwykłych czynności związanych z prowadzeniem \
działalności pozarolniczej w rozumieniu przepisów o systemie ubezpieczeń społecznych.";

/// Values for the accident card placeholders. Missing entries render as "-".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardData {
    #[serde(default)]
    pub payer_name: Option<String>,
    #[serde(default)]
    pub payer_address: Option<String>,
    #[serde(default)]
    pub payer_nip: Option<String>,
    #[serde(default)]
    pub payer_regon: Option<String>,
    #[serde(default)]
    pub payer_pesel: Option<String>,
    #[serde(default)]
    pub payer_identity_document: Option<String>,
    #[serde(default)]
    pub payer_document_type: Option<String>,
    #[serde(default)]
    pub payer_document_series: Option<String>,
    #[serde(default)]
    pub victim_name: Option<String>,
    #[serde(default)]
    pub victim_pesel: Option<String>,
    #[serde(default)]
    pub victim_identity_document: Option<String>,
    #[serde(default)]
    pub victim_document_type: Option<String>,
    #[serde(default)]
    pub victim_document_series: Option<String>,
    #[serde(default)]
    pub victim_birth_details: Option<String>,
    #[serde(default)]
    pub victim_address: Option<String>,
    #[serde(default)]
    pub insurance_title: Option<String>,
    #[serde(default)]
    pub insurance_title_additional: Option<String>,
    #[serde(default)]
    pub activity_type: Option<String>,
    #[serde(default)]
    pub report_details: Option<String>,
    #[serde(default)]
    pub accident_info: Option<String>,
    #[serde(default)]
    pub accident_date: Option<String>,
    #[serde(default)]
    pub accident_effect: Option<String>,
    #[serde(default)]
    pub witness_name: Option<String>,
    #[serde(default)]
    pub witness_address: Option<String>,
    #[serde(default)]
    pub work_accident_decision: Option<String>,
    #[serde(default)]
    pub work_accident_justification: Option<String>,
    #[serde(default)]
    pub bhp_violation_decision: Option<String>,
    #[serde(default)]
    pub bhp_violation_evidence: Option<String>,
    #[serde(default)]
    pub intoxication_decision: Option<String>,
    #[serde(default)]
    pub intoxication_evidence: Option<String>,
    #[serde(default)]
    pub acknowledged_person: Option<String>,
    #[serde(default)]
    pub card_created_date: Option<String>,
    #[serde(default)]
    pub card_created_signature: Option<String>,
    #[serde(default)]
    pub zus_entity_name: Option<String>,
    #[serde(default)]
    pub zus_officer_name: Option<String>,
    #[serde(default)]
    pub zus_officer_signature: Option<String>,
    #[serde(default)]
    pub obstacles: Option<String>,
    #[serde(default)]
    pub card_received_date: Option<String>,
    #[serde(default)]
    pub attachments: Option<String>,
}

impl CardData {
    /// Derive card values from a stored notification.
    pub fn from_document(doc: &DocumentModel) -> Self {
        let data = &doc.data;

        let victim_address = format_address(
            &data.ulica,
            &data.nr_domu,
            data.nr_lokalu.as_deref(),
            &data.kod_pocztowy,
            &data.miejscowosc,
        );

        let report_details = match (&data.imie_zglaszajacego, &data.nazwisko_zglaszajacego) {
            (Some(imie), Some(nazwisko)) => Some(format!(
                "{}, {} {}",
                doc.created_at.format("%Y-%m-%d"),
                imie,
                nazwisko
            )),
            _ => Some(format!(
                "{}, {} {}",
                doc.created_at.format("%Y-%m-%d"),
                data.imie,
                data.nazwisko
            )),
        };

        let witness = doc.witnesses.first();

        Self {
            victim_name: Some(format!("{} {}", data.imie, data.nazwisko)),
            victim_pesel: Some(data.pesel.clone()),
            victim_document_series: Some(data.nr_dowodu.clone()),
            victim_birth_details: Some(format!(
                "{}, {}",
                data.data_urodzenia, data.miejsce_urodzenia
            )),
            victim_address: Some(victim_address),
            report_details,
            accident_info: Some(format!(
                "W dniu {} o godzinie {} w: {}. {}",
                data.data_wypadku,
                data.godzina_wypadku.format("%H:%M"),
                data.miejsce_wypadku,
                data.szczegoly_okolicznosci
            )),
            accident_date: Some(data.data_wypadku.to_string()),
            accident_effect: Some(data.rodzaj_urazow.clone()),
            witness_name: witness.map(|w| format!("{} {}", w.data.imie, w.data.nazwisko)),
            witness_address: witness.map(|w| {
                format_address(
                    &w.data.ulica,
                    &w.data.nr_domu,
                    w.data.nr_lokalu.as_deref(),
                    &w.data.kod_pocztowy,
                    &w.data.miejscowosc,
                )
            }),
            ..Default::default()
        }
    }

    fn filled_template(&self) -> String {
        let or_dash = |v: &Option<String>| -> String {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or("-")
                .to_string()
        };

        let pairs: [(&str, String); 39] = [
            ("payer_name", or_dash(&self.payer_name)),
            ("payer_address", or_dash(&self.payer_address)),
            ("payer_nip", or_dash(&self.payer_nip)),
            ("payer_regon", or_dash(&self.payer_regon)),
            ("payer_pesel", or_dash(&self.payer_pesel)),
            (
                "payer_identity_document",
                or_dash(&self.payer_identity_document),
            ),
            ("payer_document_type", or_dash(&self.payer_document_type)),
            (
                "payer_document_series",
                or_dash(&self.payer_document_series),
            ),
            ("victim_name", or_dash(&self.victim_name)),
            ("victim_pesel", or_dash(&self.victim_pesel)),
            (
                "victim_identity_document",
                or_dash(&self.victim_identity_document),
            ),
            ("victim_document_type", or_dash(&self.victim_document_type)),
            (
                "victim_document_series",
                or_dash(&self.victim_document_series),
            ),
            ("victim_birth_details", or_dash(&self.victim_birth_details)),
            ("victim_address", or_dash(&self.victim_address)),
            ("insurance_title", or_dash(&self.insurance_title)),
            (
                "insurance_title_additional",
                self.insurance_title_additional.clone().unwrap_or_default(),
            ),
            (
                "activity_type",
                self.activity_type
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .unwrap_or(DEFAULT_ACTIVITY_TYPE)
                    .to_string(),
            ),
            ("report_details", or_dash(&self.report_details)),
            ("accident_info", or_dash(&self.accident_info)),
            ("accident_date", or_dash(&self.accident_date)),
            ("accident_effect", or_dash(&self.accident_effect)),
            ("witness_name", or_dash(&self.witness_name)),
            ("witness_address", or_dash(&self.witness_address)),
            (
                "work_accident_decision",
                or_dash(&self.work_accident_decision),
            ),
            (
                "work_accident_justification",
                or_dash(&self.work_accident_justification),
            ),
            ("bhp_violation_decision", or_dash(&self.bhp_violation_decision)),
            ("bhp_violation_evidence", or_dash(&self.bhp_violation_evidence)),
            ("intoxication_decision", or_dash(&self.intoxication_decision)),
            ("intoxication_evidence", or_dash(&self.intoxication_evidence)),
            ("acknowledged_person", or_dash(&self.acknowledged_person)),
            ("card_created_date", or_dash(&self.card_created_date)),
            (
                "card_created_signature",
                or_dash(&self.card_created_signature),
            ),
            ("zus_entity_name", or_dash(&self.zus_entity_name)),
            ("zus_officer_name", or_dash(&self.zus_officer_name)),
            ("zus_officer_signature", or_dash(&self.zus_officer_signature)),
            ("obstacles", or_dash(&self.obstacles)),
            ("card_received_date", or_dash(&self.card_received_date)),
            ("attachments", or_dash(&self.attachments)),
        ];

        let mut text = CARD_TEMPLATE.to_string();
        for (key, value) in pairs {
            text = text.replace(&format!("{{{}}}", key), &value);
        }
        text
    }
}

fn format_address(
    ulica: &str,
    nr_domu: &str,
    nr_lokalu: Option<&str>,
    kod_pocztowy: &str,
    miejscowosc: &str,
) -> String {
    let number = match nr_lokalu.filter(|s| !s.trim().is_empty()) {
        Some(lokal) => format!("{}/{}", nr_domu, lokal),
        None => nr_domu.to_string(),
    };
    format!("ul. {} {}, {} {}", ulica, number, kod_pocztowy, miejscowosc)
}

/// Render the accident card PDF from the textual template.
pub fn render_card(data: &CardData) -> Result<Vec<u8>, PdfError> {
    let text = data.filled_template();

    let lines: Vec<String> = text
        .lines()
        .flat_map(|line| wrap_line(line, MAX_LINE_CHARS))
        .collect();

    let mut doc = Document::with_version("1.5");

    let encoding_id = doc.add_object(dictionary! {
        "Type" => "Encoding",
        "BaseEncoding" => "WinAnsiEncoding",
        "Differences" => Object::Array(differences()),
    });
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => Object::Reference(encoding_id),
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => Object::Reference(font_id) },
    });

    let pages_id = doc.new_object_id();
    let mut page_refs = Vec::new();

    for chunk in lines.chunks(LINES_PER_PAGE.max(1)) {
        let content = page_content(chunk);
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().map_err(PdfError::Lopdf)?,
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => Object::Array(vec![
                0.into(),
                0.into(),
                Object::Real(PAGE_WIDTH),
                Object::Real(PAGE_HEIGHT),
            ]),
            "Contents" => Object::Reference(content_id),
            "Resources" => Object::Reference(resources_id),
        });
        page_refs.push(Object::Reference(page_id));
    }

    let count = page_refs.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => Object::Array(page_refs),
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut out = Vec::new();
    doc.save_to(&mut out)?;
    Ok(out)
}

fn page_content(lines: &[String]) -> Content {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![Object::Name(b"F1".to_vec()), Object::Real(FONT_SIZE)],
        ),
        Operation::new("TL", vec![Object::Real(LINE_SPACING)]),
        Operation::new(
            "Td",
            vec![
                Object::Real(MARGIN),
                Object::Real(PAGE_HEIGHT - MARGIN - FONT_SIZE),
            ],
        ),
    ];
    for line in lines {
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(encode_line(line), StringFormat::Literal)],
        ));
        operations.push(Operation::new("T*", vec![]));
    }
    operations.push(Operation::new("ET", vec![]));
    Content { operations }
}

/// Word-wrap one template line; "- " bullets keep a hanging indent.
fn wrap_line(line: &str, max_chars: usize) -> Vec<String> {
    if line.trim().is_empty() {
        return vec![String::new()];
    }

    let (bullet, continuation, working) = match line.strip_prefix("- ") {
        Some(rest) => ("- ", "  ", rest),
        None => ("", "", line),
    };

    let mut lines = Vec::new();
    let mut current = bullet.to_string();

    for word in working.split_whitespace() {
        let candidate = if current.is_empty() || current.ends_with(' ') {
            format!("{}{}", current, word)
        } else {
            format!("{} {}", current, word)
        };
        if candidate.chars().count() <= max_chars {
            current = candidate;
            continue;
        }
        if !current.trim().is_empty() {
            lines.push(current);
        }
        current = format!("{}{}", continuation, word);
    }
    if !current.trim().is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    }
}

/// Custom byte codes for Polish diacritics, matching `differences`.
fn encode_line(line: &str) -> Vec<u8> {
    line.chars()
        .map(|c| match c {
            'ą' => 128,
            'ć' => 129,
            'ę' => 130,
            'ł' => 131,
            'ń' => 132,
            'ó' => 133,
            'ś' => 134,
            'ź' => 135,
            'ż' => 136,
            'Ą' => 137,
            'Ć' => 138,
            'Ę' => 139,
            'Ł' => 140,
            'Ń' => 141,
            'Ó' => 142,
            'Ś' => 143,
            'Ź' => 144,
            'Ż' => 145,
            c if c.is_ascii() => c as u8,
            _ => b'?',
        })
        .collect()
}

fn differences() -> Vec<Object> {
    let glyphs = [
        "aogonek",
        "cacute",
        "eogonek",
        "lslash",
        "nacute",
        "oacute",
        "sacute",
        "zacute",
        "zdotaccent",
        "Aogonek",
        "Cacute",
        "Eogonek",
        "Lslash",
        "Nacute",
        "Oacute",
        "Sacute",
        "Zacute",
        "Zdotaccent",
    ];
    let mut diffs = vec![Object::Integer(128)];
    diffs.extend(
        glyphs
            .iter()
            .map(|g| Object::Name(g.as_bytes().to_vec())),
    );
    diffs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_support::{sample_data, sample_witness};
    use crate::models::Witness;

    #[test]
    fn test_wrap_line() {
        assert_eq!(wrap_line("", 10), vec![""]);
        assert_eq!(wrap_line("krótki tekst", 80), vec!["krótki tekst"]);

        let wrapped = wrap_line("jeden dwa trzy cztery pięć", 10);
        assert_eq!(wrapped, vec!["jeden dwa", "trzy", "cztery", "pięć"]);

        // Bullets get a hanging indent
        let wrapped = wrap_line("- pierwszy element listy", 12);
        assert_eq!(wrapped[0], "- pierwszy");
        assert!(wrapped[1].starts_with("  "));
    }

    #[test]
    fn test_encode_line_diacritics() {
        assert_eq!(encode_line("abc"), b"abc".to_vec());
        assert_eq!(encode_line("żółć"), vec![136, 133, 131, 129]);
        assert_eq!(encode_line("€"), vec![b'?']);
    }

    #[test]
    fn test_render_default_card() {
        let pdf = render_card(&CardData::default()).unwrap();
        assert!(pdf.starts_with(b"%PDF"));

        let doc = Document::load_mem(&pdf).unwrap();
        assert!(doc.page_iter().count() >= 1);
    }

    #[test]
    fn test_long_text_spans_more_pages() {
        let short_pages = {
            let pdf = render_card(&CardData::default()).unwrap();
            Document::load_mem(&pdf).unwrap().page_iter().count()
        };

        let mut data = CardData::default();
        data.accident_info = Some("bardzo długi opis okoliczności ".repeat(300));
        let pdf = render_card(&data).unwrap();
        let long_pages = Document::load_mem(&pdf).unwrap().page_iter().count();

        assert!(long_pages > short_pages);
    }

    #[test]
    fn test_from_document_fills_victim_section() {
        let doc = DocumentModel {
            id: "doc-1".to_string(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
            data: sample_data(),
            witnesses: vec![Witness {
                id: 1,
                document_id: "doc-1".to_string(),
                data: sample_witness(),
            }],
        };

        let card = CardData::from_document(&doc);
        assert_eq!(card.victim_name.as_deref(), Some("Jan Kowalski"));
        assert_eq!(card.victim_pesel.as_deref(), Some("44051401359"));
        assert_eq!(
            card.victim_address.as_deref(),
            Some("ul. Kwiatowa 12/4, 00-001 Warszawa")
        );
        assert_eq!(card.witness_name.as_deref(), Some("Anna Lis"));
        assert_eq!(card.accident_date.as_deref(), Some("2024-11-08"));
    }
}
