//! Canonical default settings
//!
//! Every call builds a new value from literals, so callers own what they
//! get back and may mutate it freely.

use serde_json::{json, Map, Value};

use crate::section::SectionName;
use crate::settings::Settings;

/// Build the complete default settings object.
///
/// # Examples
/// ```
/// use zr_schema::{get_defaults, SectionName};
///
/// let defaults = get_defaults();
/// assert_eq!(defaults.sections().count(), SectionName::ALL.len());
/// assert_eq!(defaults.get("/copy/template"), Some(&serde_json::json!("@{{key}}")));
/// ```
#[must_use]
pub fn get_defaults() -> Settings {
    let mut map = Map::new();
    for section in SectionName::ALL {
        map.insert(section.as_str().to_string(), section_defaults(section));
    }
    Settings::from_map(map)
}

/// Build the default value of a single section.
#[must_use]
pub fn section_defaults(section: SectionName) -> Value {
    match section {
        SectionName::Annotations => annotations(),
        SectionName::Autocomplete => autocomplete(),
        SectionName::Copy => copy(),
        SectionName::Metadata => metadata(),
        SectionName::Notes => notes(),
        SectionName::Other => other(),
        SectionName::PageMenu => page_menu(),
        SectionName::SciteBadge => scite_badge(),
        SectionName::Shortcuts => shortcuts(),
        SectionName::Typemap => typemap(),
        SectionName::Webimport => webimport(),
    }
}

fn annotations() -> Value {
    json!({
        "comment_prefix": "",
        "comment_suffix": "",
        "func": "",
        "group_by": false,
        "highlight_prefix": "[[>]]",
        "highlight_suffix": "([p. {{page_label}}]({{link_page}}))",
        "template_comment": "{{comment}}",
        "template_highlight": "[[>]] {{highlight}} ([p. {{page_label}}]({{link_page}})) {{tags_string}}",
        "use": "default",
        "__with": "raw"
    })
}

fn autocomplete() -> Value {
    json!({
        "display_char": "",
        "display_use": "preset",
        "display": "citekey",
        "format_char": "",
        "format_use": "preset",
        "format": "citation",
        "trigger": ""
    })
}

fn copy() -> Value {
    json!({
        "always": false,
        "overrideKey": "shiftKey",
        "preset": "citekey",
        "template": "@{{key}}",
        "useAsDefault": "preset",
        "useQuickCopy": false
    })
}

fn metadata() -> Value {
    json!({
        "func": "",
        "smartblock": {
            "param": "srcUid",
            "paramValue": ""
        },
        "use": "default"
    })
}

fn notes() -> Value {
    json!({
        "func": "",
        "nest_char": "",
        "nest_position": "top",
        "nest_preset": "[[Notes]]",
        "nest_use": "preset",
        "split_char": "",
        "split_preset": "\n",
        "split_use": "preset",
        "use": "text",
        "__with": "text"
    })
}

fn other() -> Value {
    json!({
        "autoload": false,
        "cacheEnabled": false,
        "darkTheme": false,
        "render_inline": false
    })
}

fn page_menu() -> Value {
    json!({
        "defaults": [
            "addToGraph",
            "addChildrenToGraph",
            "addMetadata",
            "importNotes",
            "viewItemInfo",
            "openZoteroLocal",
            "openZoteroWeb",
            "openPDF",
            "openSourceURL",
            "openInDatabase",
            "openConnectedPapers",
            "openSemanticScholar",
            "openGoogleScholar",
            "citingPapers"
        ],
        "trigger": true
    })
}

fn scite_badge() -> Value {
    json!({
        "layout": "horizontal",
        "showLabels": false,
        "showZero": true,
        "small": false,
        "tooltipPlacement": "auto",
        "tooltipSlide": 0
    })
}

fn shortcuts() -> Value {
    json!({
        "copyCitation": "",
        "copyCitekey": "",
        "copyDefault": "",
        "copyPageRef": "",
        "copyTag": "",
        "focusSearchBar": "",
        "goToItemPage": "",
        "importMetadata": "",
        "toggleDashboard": "",
        "toggleNotes": "",
        "toggleQuickCopy": "",
        "toggleSearchPanel": "",
        "toggleSettingsPanel": ""
    })
}

fn typemap() -> Value {
    json!({
        "artwork": "Illustration",
        "audioRecording": "Recording",
        "bill": "Legislation",
        "blogPost": "Blog post",
        "book": "Book",
        "bookSection": "Chapter",
        "case": "Legal case",
        "computerProgram": "Data",
        "conferencePaper": "Conference paper",
        "dictionaryEntry": "Dictionary entry",
        "document": "Document",
        "email": "Letter",
        "encyclopediaArticle": "Encyclopaedia article",
        "film": "Film",
        "forumPost": "Forum post",
        "hearing": "Hearing",
        "instantMessage": "Instant message",
        "interview": "Interview",
        "journalArticle": "Article",
        "letter": "Letter",
        "magazineArticle": "Magazine article",
        "manuscript": "Manuscript",
        "map": "Image",
        "newspaperArticle": "Newspaper article",
        "patent": "Patent",
        "podcast": "Podcast",
        "preprint": "Preprint",
        "presentation": "Presentation",
        "radioBroadcast": "Radio broadcast",
        "report": "Report",
        "statute": "Legislation",
        "thesis": "Thesis",
        "tvBroadcast": "TV broadcast",
        "videoRecording": "Recording",
        "webpage": "Webpage"
    })
}

fn webimport() -> Value {
    json!({
        "tags": []
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_section_default_is_an_object() {
        for section in SectionName::ALL {
            assert!(
                section_defaults(section).is_object(),
                "default for {section} is not an object"
            );
        }
    }

    #[test]
    fn defaults_contain_every_section() {
        let defaults = get_defaults();
        for section in SectionName::ALL {
            assert!(defaults.section(section).is_some(), "missing {section}");
        }
        assert_eq!(defaults.as_map().len(), SectionName::ALL.len());
    }

    #[test]
    fn defaults_are_independent_instances() {
        let mut first = get_defaults();
        first
            .section_mut(SectionName::Other)
            .unwrap()
            .insert("autoload".to_string(), json!(true));

        let second = get_defaults();
        assert_eq!(second.get("/other/autoload"), Some(&json!(false)));
    }

    #[test]
    fn nested_record_defaults() {
        let defaults = get_defaults();
        assert_eq!(defaults.get("/metadata/smartblock/param"), Some(&json!("srcUid")));
        assert_eq!(defaults.get("/metadata/smartblock/paramValue"), Some(&json!("")));
    }

    #[test]
    fn section_defaults_match_full_defaults() {
        let defaults = get_defaults();
        for section in SectionName::ALL {
            assert_eq!(
                defaults.as_map().get(section.as_str()),
                Some(&section_defaults(section))
            );
        }
    }
}
