//! Prompt derivation and deterministic slot seeding
//!
//! Pure functions only: the same product name and category always yield the
//! same prompt text, and the same name/slot pair always yields the same
//! seed. Nothing in here performs I/O.

/// Facets parsed out of a product's name and category that shape the
/// generation instruction for its image set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptFacets {
    pub label: String,
    pub shielding: String,
    pub construction: String,
    pub pairs: String,
    pub connector: String,
    pub use_context: String,
}

impl PromptFacets {
    /// Parse facets from product metadata, case-insensitively.
    ///
    /// Networking defaults are derived from keyword triggers in the name;
    /// non-networking category lines (CCTV, telephone, speaker, lift, power
    /// cord) override shielding/connector/use-context/label wholesale.
    pub fn parse(name: &str, category: &str) -> Self {
        let name_lc = name.to_lowercase();
        let category_lc = category.to_lowercase();
        let haystack = format!("{name_lc} {category_lc}");

        let shielded = name_lc.contains("stp");
        let shielding = if shielded {
            "shielded with braided shield"
        } else if name_lc.contains("ftp") {
            "foil shielded"
        } else {
            "unshielded"
        };

        let construction = if haystack.contains("flat") {
            "flat low-profile"
        } else if haystack.contains("armored") || haystack.contains("armoured") {
            "steel armored"
        } else if haystack.contains("outdoor") {
            "outdoor UV-resistant jacket"
        } else {
            "round PVC jacket"
        };

        let pairs = if name_lc.contains("2 pair") {
            "2 twisted pairs"
        } else {
            "4 twisted pairs"
        };

        let connector = if shielded { "shielded RJ45" } else { "RJ45" };

        let mut facets = Self {
            label: name.trim().to_string(),
            shielding: shielding.to_string(),
            construction: construction.to_string(),
            pairs: pairs.to_string(),
            connector: connector.to_string(),
            use_context: "structured network cabling installation".to_string(),
        };

        // Category overrides for the non-networking product lines.
        if category_lc.contains("cctv") {
            if name_lc.contains("3+1") {
                facets.label = "CCTV 3+1".to_string();
                facets.pairs = "1 coax + 3 power".to_string();
            } else {
                facets.label = "CCTV".to_string();
                facets.pairs = "1 coax core".to_string();
            }
            facets.shielding = "braided coax shield".to_string();
            facets.connector = "BNC and DC power leads".to_string();
            facets.use_context = "CCTV surveillance installation".to_string();
        } else if category_lc.contains("telephone") {
            facets.label = "Telephone".to_string();
            facets.shielding = "unshielded".to_string();
            facets.connector = "RJ11".to_string();
            facets.use_context = "telephone wall wiring".to_string();
        } else if category_lc.contains("speaker") {
            facets.label = "Speaker".to_string();
            facets.shielding = "unshielded".to_string();
            facets.connector = "bare copper ends".to_string();
            facets.use_context = "home audio speaker hookup".to_string();
        } else if category_lc.contains("lift") {
            facets.label = "Lift".to_string();
            facets.construction = "flexible travel construction".to_string();
            facets.connector = "terminal lugs".to_string();
            facets.use_context = "elevator travelling installation".to_string();
        } else if category_lc.contains("power cord") {
            facets.label = "Power Cord".to_string();
            facets.shielding = "unshielded".to_string();
            facets.connector = "3-pin moulded plug".to_string();
            facets.use_context = "appliance mains connection".to_string();
        }

        facets
    }

    /// Concatenate the facets into the single generation instruction string.
    pub fn into_prompt(self) -> String {
        format!(
            "Professional studio product photo of {} cable: {}, {}, {} construction, \
             terminated with {}, shown in {}. Clean white background, sharp focus, \
             consistent lighting across hero, macro, alternate angle, in-use and packaging shots.",
            self.label, self.pairs, self.shielding, self.construction, self.connector, self.use_context
        )
    }
}

/// Derive the generation instruction for a product. Pure and reproducible.
pub fn derive_prompt(name: &str, category: &str) -> String {
    PromptFacets::parse(name, category).into_prompt()
}

/// Stable 32-bit seed for one slot of one product.
///
/// Iterates the UTF-16 code units of `name` followed by the decimal slot
/// index, combining as `hash = hash * 31 + code` with i32 wrap-around. Used
/// only to pick a deterministic placeholder variant, never for uniqueness.
pub fn slot_seed(name: &str, slot: usize) -> i32 {
    let input = format!("{name}{slot}");
    let mut hash: i32 = 0;
    for code in input.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(code as i32);
    }
    hash
}
