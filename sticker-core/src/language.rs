//! Languages offered for sticker text, with ready-made phrases.

/// A language the editor offers sample phrases for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageOption {
    /// BCP 47 language tag sent with saved designs.
    pub code: &'static str,
    /// English name.
    pub name: &'static str,
    /// Name in the language itself.
    pub native_name: &'static str,
    /// Phrases suggested by the text tool.
    pub sample_texts: &'static [&'static str],
}

/// Supported languages; the first entry is the default.
pub const LANGUAGES: &[LanguageOption] = &[
    LanguageOption {
        code: "en",
        name: "English",
        native_name: "English",
        sample_texts: &["SCAN FOR HELP", "EMERGENCY", "OWNER INFO", "CONTACT", "CALL NOW"],
    },
    LanguageOption {
        code: "hi",
        name: "Hindi",
        native_name: "हिन्दी",
        sample_texts: &["स्कैन करें", "आपातकालीन", "मालिक जानकारी", "संपर्क करें", "मदद"],
    },
    LanguageOption {
        code: "as",
        name: "Assamese",
        native_name: "অসমীয়া",
        sample_texts: &["স্কেন কৰক", "জৰুৰীকালীন", "মালিকৰ তথ্য", "যোগাযোগ", "সহায়"],
    },
    LanguageOption {
        code: "bn",
        name: "Bengali",
        native_name: "বাংলা",
        sample_texts: &["স্ক্যান করুন", "জরুরি", "মালিকের তথ্য", "যোগাযোগ", "সাহায্য"],
    },
    LanguageOption {
        code: "ta",
        name: "Tamil",
        native_name: "தமிழ்",
        sample_texts: &["ஸ்கேன் செய்", "அவசரம்", "உரிமையாளர்", "தொடர்பு", "உதவி"],
    },
    LanguageOption {
        code: "te",
        name: "Telugu",
        native_name: "తెలుగు",
        sample_texts: &["స్కాన్ చేయండి", "అత్యవసరం", "యజమాని", "సంప్రదించండి", "సహాయం"],
    },
    LanguageOption {
        code: "kn",
        name: "Kannada",
        native_name: "ಕನ್ನಡ",
        sample_texts: &["ಸ್ಕ್ಯಾನ್ ಮಾಡಿ", "ತುರ್ತು", "ಮಾಲೀಕರು", "ಸಂಪರ್ಕಿಸಿ", "ಸಹಾಯ"],
    },
    LanguageOption {
        code: "ml",
        name: "Malayalam",
        native_name: "മലയാളം",
        sample_texts: &["സ്കാൻ ചെയ്യുക", "അടിയന്തിരം", "ഉടമ", "ബന്ധപ്പെടുക", "സഹായം"],
    },
    LanguageOption {
        code: "mr",
        name: "Marathi",
        native_name: "मराठी",
        sample_texts: &["स्कॅन करा", "आपत्कालीन", "मालक माहिती", "संपर्क", "मदत"],
    },
    LanguageOption {
        code: "gu",
        name: "Gujarati",
        native_name: "ગુજરાતી",
        sample_texts: &["સ્કેન કરો", "કટોકટી", "માલિક માહિતી", "સંપર્ક", "મદદ"],
    },
    LanguageOption {
        code: "pa",
        name: "Punjabi",
        native_name: "ਪੰਜਾਬੀ",
        sample_texts: &["ਸਕੈਨ ਕਰੋ", "ਐਮਰਜੈਂਸੀ", "ਮਾਲਕ ਜਾਣਕਾਰੀ", "ਸੰਪਰਕ", "ਮਦਦ"],
    },
    LanguageOption {
        code: "or",
        name: "Odia",
        native_name: "ଓଡ଼ିଆ",
        sample_texts: &["ସ୍କାନ କରନ୍ତୁ", "ଜରୁରୀ", "ମାଲିକ", "ଯୋଗାଯୋଗ", "ସାହାଯ୍ୟ"],
    },
];

/// Find a language by its tag.
#[must_use]
pub fn find_language(code: &str) -> Option<&'static LanguageOption> {
    LANGUAGES.iter().find(|l| l.code == code)
}

/// The default language.
#[must_use]
pub fn default_language() -> &'static LanguageOption {
    &LANGUAGES[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_english() {
        assert_eq!(default_language().code, "en");
    }

    #[test]
    fn test_every_language_has_five_phrases() {
        for language in LANGUAGES {
            assert_eq!(language.sample_texts.len(), 5, "{}", language.code);
        }
        assert_eq!(find_language("as").map(|l| l.name), Some("Assamese"));
        assert!(find_language("xx").is_none());
    }
}
