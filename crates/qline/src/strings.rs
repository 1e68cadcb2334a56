#![forbid(unsafe_code)]

//! The site's shipped dictionary.
//!
//! Legal copy (`privacyPage.*` body text) is English-only and reaches other
//! languages through the primary fallback.

use qline_i18n::{Dictionary, I18nError, TranslationEntry};

const ENTRIES: &[(&str, &str, &str, &str)] = &[
    // Navigation
    ("nav.home", "Home", "Accueil", "الرئيسية"),
    ("nav.about", "About", "À propos", "من نحن"),
    ("nav.contact", "Contact", "Contact", "اتصل بنا"),
    ("nav.privacy", "Privacy Policy", "Politique de confidentialité", "سياسة الخصوصية"),
    ("nav.language", "Language", "Langue", "اللغة"),
    // Landing page
    (
        "hero.title",
        "Smart Queue Management",
        "Gestion intelligente des files",
        "إدارة قائمة الانتظار الذكية",
    ),
    (
        "hero.subtitle",
        "Cut waiting times and keep every customer informed.",
        "Réduisez l'attente et informez chaque client.",
        "قلّل أوقات الانتظار وأبقِ كل عميل على اطلاع.",
    ),
    ("hero.cta", "Get started", "Commencer", "ابدأ الآن"),
    ("hero.secondaryCta", "Learn more", "En savoir plus", "اعرف المزيد"),
    ("features.title", "Features", "Fonctionnalités", "المميزات"),
    (
        "features.realtime.title",
        "Real-time updates",
        "Mises à jour en temps réel",
        "تحديثات فورية",
    ),
    (
        "features.realtime.description",
        "Customers see their position change as the queue moves.",
        "Les clients voient leur position évoluer avec la file.",
        "يرى العملاء موقعهم يتغير مع تقدم الطابور.",
    ),
    (
        "features.analytics.title",
        "Analytics",
        "Statistiques",
        "التحليلات",
    ),
    (
        "features.analytics.description",
        "Understand peak hours and staff accordingly.",
        "Identifiez les heures de pointe et adaptez vos équipes.",
        "اعرف أوقات الذروة ووزّع الموظفين وفقًا لها.",
    ),
    (
        "features.multilingual.title",
        "Multilingual",
        "Multilingue",
        "متعدد اللغات",
    ),
    (
        "features.multilingual.description",
        "Serve customers in English, French and Arabic.",
        "Servez vos clients en anglais, français et arabe.",
        "خدمة العملاء بالإنجليزية والفرنسية والعربية.",
    ),
    // About
    ("aboutPage.title", "About Us", "À propos de nous", "من نحن"),
    (
        "aboutPage.mission",
        "We help service businesses turn waiting lines into good experiences.",
        "Nous aidons les entreprises de service à transformer l'attente en bonne expérience.",
        "نساعد شركات الخدمات على تحويل الانتظار إلى تجربة جيدة.",
    ),
    // Contact
    ("contactPage.title", "Contact Us", "Contactez-nous", "اتصل بنا"),
    ("contactPage.name", "Name", "Nom", "الاسم"),
    ("contactPage.email", "Email", "E-mail", "البريد الإلكتروني"),
    ("contactPage.message", "Message", "Message", "الرسالة"),
    ("contactPage.submit", "Send message", "Envoyer", "إرسال"),
    ("contactPage.successTitle", "Message sent", "Message envoyé", "تم إرسال الرسالة"),
    (
        "contactPage.successDescription",
        "Thank you, {name}. We will get back to you soon.",
        "Merci, {name}. Nous vous répondrons rapidement.",
        "شكرًا، {name}. سنعاود الاتصال بك قريبًا.",
    ),
    (
        "contactPage.errorTitle",
        "Please check the form",
        "Veuillez vérifier le formulaire",
        "يرجى التحقق من النموذج",
    ),
    (
        "contactPage.errorRequired",
        "This field is required.",
        "Ce champ est obligatoire.",
        "هذا الحقل مطلوب.",
    ),
    (
        "contactPage.errorEmail",
        "Enter a valid email address.",
        "Saisissez une adresse e-mail valide.",
        "أدخل بريدًا إلكترونيًا صالحًا.",
    ),
    // Privacy
    (
        "privacyPage.title",
        "Privacy Policy",
        "Politique de confidentialité",
        "سياسة الخصوصية",
    ),
    // Footer and errors
    (
        "footer.rights",
        "All rights reserved.",
        "Tous droits réservés.",
        "جميع الحقوق محفوظة.",
    ),
    ("notFound.title", "Page not found", "Page introuvable", "الصفحة غير موجودة"),
    (
        "notFound.back",
        "Back to home",
        "Retour à l'accueil",
        "العودة إلى الرئيسية",
    ),
];

const ENGLISH_ONLY: &[(&str, &str)] = &[
    (
        "privacyPage.intro",
        "This policy explains what information we collect and how we use it.",
    ),
    (
        "privacyPage.collection",
        "We only collect the details you submit through the contact form.",
    ),
    (
        "privacyPage.retention",
        "Contact requests are kept no longer than needed to answer them.",
    ),
    ("privacyPage.lastUpdated", "Last updated: January 2025"),
];

/// Build the dictionary the site ships with.
pub fn site_dictionary() -> Result<Dictionary, I18nError> {
    let mut builder = Dictionary::builder();
    for &(key, en, fr, ar) in ENTRIES {
        builder.insert(key, TranslationEntry::trilingual(en, fr, ar))?;
    }
    for &(key, en) in ENGLISH_ONLY {
        builder.insert(key, TranslationEntry::new(en))?;
    }
    builder.build()
}

/// Keys that exist only in the primary language, sorted.
#[must_use]
pub fn primary_only_keys() -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = ENGLISH_ONLY.iter().map(|&(key, _)| key).collect();
    keys.sort_unstable();
    keys
}
