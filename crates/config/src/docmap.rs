//! Parser for the document/sheet mapping string.
//!
//! Format: `doc:sheet1[col],sheet2[col];doc2:sheet3[col]` — semicolons
//! separate documents, a colon separates the document name from its
//! comma-separated sheet list, and the optional bracketed suffix per
//! sheet is a match-column hint some backends use. We strip and ignore
//! it here.
//!
//! Parsing never fails: malformed segments are dropped, an empty input
//! yields an empty map. Whether an empty map is a problem is the
//! surface's call, not ours.

/// One configured document and its sheets, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEntry {
    pub name: String,
    pub sheets: Vec<String>,
}

/// Ordered document → sheets mapping. Immutable after parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMap {
    entries: Vec<DocumentEntry>,
}

impl DocumentMap {
    pub fn parse(raw: &str) -> Self {
        let mut entries: Vec<DocumentEntry> = Vec::new();

        for segment in raw.split(';') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            // Only the first two colon-separated parts matter: the name
            // and the sheet list. Anything after a second colon is
            // discarded, not folded into a sheet name.
            let mut parts = segment.split(':');
            let (Some(name), Some(sheet_list)) = (parts.next(), parts.next()) else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }

            let sheets: Vec<String> = sheet_list
                .split(',')
                .map(|sheet| strip_match_column(sheet.trim()))
                .filter(|sheet| !sheet.is_empty())
                .collect();
            if sheets.is_empty() {
                continue;
            }

            // A repeated document name replaces the earlier sheet list
            // but keeps its original position.
            match entries.iter_mut().find(|e| e.name == name) {
                Some(existing) => existing.sheets = sheets,
                None => entries.push(DocumentEntry {
                    name: name.to_string(),
                    sheets,
                }),
            }
        }

        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn documents(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn sheets(&self, document: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.name == document)
            .map(|e| e.sheets.as_slice())
    }

    pub fn contains_sheet(&self, document: &str, sheet: &str) -> bool {
        self.sheets(document)
            .is_some_and(|sheets| sheets.iter().any(|s| s == sheet))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DocumentEntry> {
        self.entries.iter()
    }
}

/// Drops the bracketed match-column hint (first `[` through last `]`)
/// and any surrounding whitespace.
fn strip_match_column(sheet: &str) -> String {
    match (sheet.find('['), sheet.rfind(']')) {
        (Some(open), Some(close)) if open < close => {
            let mut out = String::with_capacity(sheet.len());
            out.push_str(&sheet[..open]);
            out.push_str(&sheet[close + 1..]);
            out.trim().to_string()
        }
        _ => sheet.trim().to_string(),
    }
}
