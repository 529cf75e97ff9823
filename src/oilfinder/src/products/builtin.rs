//! Built-in product slug table
//!
//! Hand-curated from the retailer's product sitemap. Several slug spellings
//! point at the same product page so that the candidate list in
//! [`crate::products::slug_candidates`] finds it.

use phf::phf_map;

/// Storefront search endpoint used when no slug matches
pub const SEARCH_URL: &str = "https://www.castrolclassic.co.za/search";

/// Lowercase slug variant -> product page
pub static PRODUCT_URLS: phf::Map<&'static str, &'static str> = phf_map! {
    "xl30" => "https://www.castrolclassic.co.za/products/classic-xl30",
    "classic-xl30" => "https://www.castrolclassic.co.za/products/classic-xl30",
    "xxl40" => "https://www.castrolclassic.co.za/products/classic-xxl40",
    "classic-xxl40" => "https://www.castrolclassic.co.za/products/classic-xxl40",
    "xl20w50" => "https://www.castrolclassic.co.za/products/castrol-classic-xl-20w50-1l",
    "xl-20w50" => "https://www.castrolclassic.co.za/products/castrol-classic-xl-20w50-1l",
    "xl20w-50" => "https://www.castrolclassic.co.za/products/castrol-classic-xl-20w50-1l",
    "xl-20w-50" => "https://www.castrolclassic.co.za/products/castrol-classic-xl-20w50-1l",
    "ep90" => "https://www.castrolclassic.co.za/products/classic-ep90",
    "classic-ep90" => "https://www.castrolclassic.co.za/products/classic-ep90",
    "ep140" => "https://www.castrolclassic.co.za/products/classic-ep140",
    "classic-ep140" => "https://www.castrolclassic.co.za/products/classic-ep140",
    "d140" => "https://www.castrolclassic.co.za/products/classic-d140",
    "classic-d140" => "https://www.castrolclassic.co.za/products/classic-d140",
    "st90" => "https://www.castrolclassic.co.za/products/classic-st90",
    "classic-st90" => "https://www.castrolclassic.co.za/products/classic-st90",
    "tqf" => "https://www.castrolclassic.co.za/products/classic-tqf",
    "classic-tqf" => "https://www.castrolclassic.co.za/products/classic-tqf",
    "gp50" => "https://www.castrolclassic.co.za/products/classic-gp50",
    "classic-gp50" => "https://www.castrolclassic.co.za/products/classic-gp50",
    "r40" => "https://www.castrolclassic.co.za/products/castrol-r40",
    "castrol-r40" => "https://www.castrolclassic.co.za/products/castrol-r40",
    "ep80w" => "https://www.castrolclassic.co.za/products/transmax-manual-ep80w",
    "manual-ep80w" => "https://www.castrolclassic.co.za/products/transmax-manual-ep80w",
    "gtx-10w-40" => "https://www.castrolclassic.co.za/products/castrol-gtx-classic-10w-40-5l",
    "gtx-10w40" => "https://www.castrolclassic.co.za/products/castrol-gtx-classic-10w-40-5l",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_lowercase_slugs() {
        for key in PRODUCT_URLS.keys() {
            assert_eq!(*key, key.to_lowercase());
            assert!(!key.contains(char::is_whitespace), "{key}");
        }
    }

    #[test]
    fn test_urls_are_absolute() {
        for url in PRODUCT_URLS.values() {
            assert!(url.starts_with("https://"), "{url}");
        }
    }
}
