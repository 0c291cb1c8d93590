//! User-facing message catalogue.
//!
//! Flash messages travel between requests as stable keys (see [`Message::key`]),
//! and are only turned into text when a page is rendered, in the locale the
//! portal is configured for.

use std::fmt;
use std::str::FromStr;

/// Interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    En,
    #[default]
    Ar,
}

impl Locale {
    /// BCP 47 language tag for the `<html lang>` attribute.
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
        }
    }

    /// Text direction for the `<html dir>` attribute.
    pub fn dir(self) -> &'static str {
        match self {
            Locale::En => "ltr",
            Locale::Ar => "rtl",
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "ar" => Ok(Locale::Ar),
            other => Err(format!("unsupported locale '{other}'")),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Every translatable message the portal can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    NotFoundOrDenied,
    BadgeNotFound,
    AccessDenied,
    LoginRequired,
    LoginSucceeded,
    LoginFailed,
    LoggedOut,
    Registered,
    UsernameTaken,
    InvalidForm,
    EventNotFound,
    EventSaved,
    HadithNotFound,
    HadithSaved,
    BookmarkAdded,
    BookmarkRemoved,
    ItemNotFound,
    RoleUpdated,
    UserNotFound,
    ContentDeleted,
    BadgeSaved,
    BadgeNameTaken,
    RestoreSucceeded,
    RestoreInvalid,
    AllCenturies,
}

/// Key and translations, one row per [`Message`].
const CATALOGUE: &[(Message, &str, &str, &str)] = &[
    (
        Message::NotFoundOrDenied,
        "not_found_or_denied",
        "Item not found or access denied.",
        "العنصر غير موجود أو ليس لديك صلاحية الوصول.",
    ),
    (
        Message::BadgeNotFound,
        "badge_not_found",
        "Badge not found.",
        "الوسام غير موجود.",
    ),
    (
        Message::AccessDenied,
        "access_denied",
        "You do not have permission to access this page.",
        "ليس لديك صلاحية للوصول إلى هذه الصفحة.",
    ),
    (
        Message::LoginRequired,
        "login_required",
        "Please log in to continue.",
        "يرجى تسجيل الدخول للمتابعة.",
    ),
    (
        Message::LoginSucceeded,
        "login_succeeded",
        "Welcome back!",
        "مرحباً بعودتك!",
    ),
    (
        Message::LoginFailed,
        "login_failed",
        "Invalid username or password.",
        "اسم المستخدم أو كلمة المرور غير صحيحة.",
    ),
    (
        Message::LoggedOut,
        "logged_out",
        "You have been logged out.",
        "تم تسجيل خروجك.",
    ),
    (
        Message::Registered,
        "registered",
        "Account created. You can now log in.",
        "تم إنشاء الحساب. يمكنك الآن تسجيل الدخول.",
    ),
    (
        Message::UsernameTaken,
        "username_taken",
        "That username is already taken.",
        "اسم المستخدم مستخدم بالفعل.",
    ),
    (
        Message::InvalidForm,
        "invalid_form",
        "Please check the form and try again.",
        "يرجى مراجعة النموذج والمحاولة مرة أخرى.",
    ),
    (
        Message::EventNotFound,
        "event_not_found",
        "Event not found.",
        "الحدث غير موجود.",
    ),
    (
        Message::EventSaved,
        "event_saved",
        "Event saved.",
        "تم حفظ الحدث.",
    ),
    (
        Message::HadithNotFound,
        "hadith_not_found",
        "Hadith not found.",
        "الحديث غير موجود.",
    ),
    (
        Message::HadithSaved,
        "hadith_saved",
        "Hadith saved.",
        "تم حفظ الحديث.",
    ),
    (
        Message::BookmarkAdded,
        "bookmark_added",
        "Bookmark added.",
        "تمت إضافة الإشارة المرجعية.",
    ),
    (
        Message::BookmarkRemoved,
        "bookmark_removed",
        "Bookmark removed.",
        "تمت إزالة الإشارة المرجعية.",
    ),
    (
        Message::ItemNotFound,
        "item_not_found",
        "Item not found.",
        "العنصر غير موجود.",
    ),
    (
        Message::RoleUpdated,
        "role_updated",
        "Role updated.",
        "تم تحديث الدور.",
    ),
    (
        Message::UserNotFound,
        "user_not_found",
        "User not found.",
        "المستخدم غير موجود.",
    ),
    (
        Message::ContentDeleted,
        "content_deleted",
        "Content deleted.",
        "تم حذف المحتوى.",
    ),
    (
        Message::BadgeSaved,
        "badge_saved",
        "Badge saved.",
        "تم حفظ الوسام.",
    ),
    (
        Message::BadgeNameTaken,
        "badge_name_taken",
        "A badge with that name already exists.",
        "يوجد وسام بهذا الاسم بالفعل.",
    ),
    (
        Message::RestoreSucceeded,
        "restore_succeeded",
        "Backup restored.",
        "تمت استعادة النسخة الاحتياطية.",
    ),
    (
        Message::RestoreInvalid,
        "restore_invalid",
        "The backup file could not be read or does not fit this portal.",
        "تعذرت قراءة ملف النسخة الاحتياطية أو أنه لا يتوافق مع هذه البوابة.",
    ),
    (
        Message::AllCenturies,
        "all_centuries",
        "All centuries",
        "تمام القرون",
    ),
];

impl Message {
    fn row(self) -> &'static (Message, &'static str, &'static str, &'static str) {
        CATALOGUE
            .iter()
            .find(|(message, ..)| *message == self)
            .unwrap_or(&CATALOGUE[0])
    }

    /// Stable identifier stored in flash cookies.
    pub fn key(self) -> &'static str {
        self.row().1
    }

    /// Looks a message up by its stable key.
    pub fn from_key(key: &str) -> Option<Self> {
        CATALOGUE
            .iter()
            .find(|(_, k, ..)| *k == key)
            .map(|(message, ..)| *message)
    }

    /// Returns the message text in `locale`.
    pub fn text(self, locale: Locale) -> &'static str {
        let (_, _, en, ar) = self.row();
        match locale {
            Locale::En => en,
            Locale::Ar => ar,
        }
    }
}

/// Translates `message` into `locale`.
pub fn t(locale: Locale, message: Message) -> &'static str {
    message.text(locale)
}
