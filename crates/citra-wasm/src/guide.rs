//! Static help text for the editor UI.

use wasm_bindgen::prelude::*;

const USAGE_GUIDE: &str = "📘 Panduan Penggunaan Aplikasi

1. Unggah gambar menggunakan panel Unggah Gambar.
2. Sesuaikan:
   - 🌞 Kecerahan
   - 🎚️ Kontras
   - 🎨 Filter dan Intensitas
   - 🔄 Rotasi
3. Gambar, informasi, dan histogram akan diperbarui otomatis.
4. Klik tombol 📘 untuk menampilkan panduan ini lagi.

🎉 Selamat mengedit gambar!";

/// Usage guide shown when the user asks for help.
#[wasm_bindgen]
pub fn usage_guide() -> String {
    USAGE_GUIDE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_guide_lists_every_control() {
        let guide = usage_guide();
        assert!(guide.starts_with("📘 Panduan Penggunaan Aplikasi\n\n1."));
        for control in ["Kecerahan", "Kontras", "Filter dan Intensitas", "Rotasi"] {
            assert!(guide.contains(control), "missing {control}");
        }
        assert!(guide.ends_with("🎉 Selamat mengedit gambar!"));
    }
}
