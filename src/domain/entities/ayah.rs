//! Quran verse entity.

/// One verse with its Arabic text and an English rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Ayah {
    pub id: i64,
    pub surah: i32,
    pub ayah: i32,
    pub text_ar: String,
    pub text_en: String,
}

impl Ayah {
    /// Conventional `surah:ayah` reference, e.g. `2:255`.
    pub fn reference(&self) -> String {
        format!("{}:{}", self.surah, self.ayah)
    }
}
