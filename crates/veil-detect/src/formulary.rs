//! Drug names grouped by therapeutic class

/// A therapeutic class with its generic and brand members
pub struct DrugClass {
    pub name: &'static str,
    pub generics: &'static [&'static str],
    pub brands: &'static [&'static str],
}

pub static CLASSES: &[DrugClass] = &[
    DrugClass {
        name: "ACE inhibitor",
        generics: &["Lisinopril", "Enalapril", "Ramipril", "Benazepril", "Captopril", "Quinapril"],
        brands: &["Zestril", "Prinivil", "Vasotec", "Altace", "Lotensin"],
    },
    DrugClass {
        name: "angiotensin receptor blocker",
        generics: &["Losartan", "Valsartan", "Irbesartan", "Olmesartan", "Candesartan", "Telmisartan"],
        brands: &["Cozaar", "Diovan", "Avapro", "Benicar", "Atacand", "Micardis"],
    },
    DrugClass {
        name: "statin",
        generics: &["Atorvastatin", "Simvastatin", "Rosuvastatin", "Pravastatin", "Lovastatin"],
        brands: &["Lipitor", "Zocor", "Crestor", "Pravachol"],
    },
    DrugClass {
        name: "beta blocker",
        generics: &["Metoprolol", "Atenolol", "Carvedilol", "Propranolol", "Bisoprolol", "Nebivolol"],
        brands: &["Lopressor", "Toprol", "Tenormin", "Coreg", "Bystolic"],
    },
    DrugClass {
        name: "calcium channel blocker",
        generics: &["Amlodipine", "Nifedipine", "Diltiazem", "Verapamil", "Felodipine"],
        brands: &["Norvasc", "Procardia", "Cardizem", "Calan"],
    },
    DrugClass {
        name: "oral antidiabetic",
        generics: &["Metformin", "Glipizide", "Glyburide", "Glimepiride", "Pioglitazone", "Sitagliptin"],
        brands: &["Glucophage", "Glucotrol", "Amaryl", "Actos", "Januvia"],
    },
    DrugClass {
        name: "SSRI antidepressant",
        generics: &["Sertraline", "Fluoxetine", "Citalopram", "Escitalopram", "Paroxetine"],
        brands: &["Zoloft", "Prozac", "Celexa", "Lexapro", "Paxil"],
    },
    DrugClass {
        name: "SNRI antidepressant",
        generics: &["Venlafaxine", "Duloxetine", "Desvenlafaxine"],
        brands: &["Effexor", "Cymbalta", "Pristiq"],
    },
    DrugClass {
        name: "benzodiazepine",
        generics: &["Alprazolam", "Lorazepam", "Clonazepam", "Diazepam"],
        brands: &["Xanax", "Ativan", "Klonopin", "Valium"],
    },
    DrugClass {
        name: "opioid analgesic",
        generics: &["Oxycodone", "Hydrocodone", "Morphine", "Hydromorphone", "Tramadol", "Tapentadol"],
        brands: &["OxyContin", "Vicodin", "Percocet", "Norco", "Dilaudid", "Ultram"],
    },
    DrugClass {
        name: "NSAID",
        generics: &["Ibuprofen", "Naproxen", "Meloxicam", "Celecoxib", "Diclofenac"],
        brands: &["Motrin", "Advil", "Aleve", "Mobic", "Celebrex"],
    },
    DrugClass {
        name: "proton pump inhibitor",
        generics: &["Omeprazole", "Pantoprazole", "Esomeprazole", "Lansoprazole", "Rabeprazole"],
        brands: &["Prilosec", "Protonix", "Nexium", "Prevacid", "Aciphex"],
    },
    DrugClass {
        name: "anticoagulant",
        generics: &["Warfarin", "Apixaban", "Rivaroxaban", "Dabigatran", "Edoxaban"],
        brands: &["Coumadin", "Eliquis", "Xarelto", "Pradaxa", "Savaysa"],
    },
    DrugClass {
        name: "penicillin antibiotic",
        generics: &["Amoxicillin", "Ampicillin", "Penicillin", "Dicloxacillin"],
        brands: &["Amoxil", "Augmentin", "Principen"],
    },
    DrugClass {
        name: "cephalosporin antibiotic",
        generics: &["Cephalexin", "Cefuroxime", "Cefdinir", "Cefadroxil"],
        brands: &["Keflex", "Ceftin", "Omnicef"],
    },
    DrugClass {
        name: "fluoroquinolone antibiotic",
        generics: &["Ciprofloxacin", "Levofloxacin", "Moxifloxacin"],
        brands: &["Cipro", "Levaquin", "Avelox"],
    },
    DrugClass {
        name: "macrolide antibiotic",
        generics: &["Azithromycin", "Clarithromycin", "Erythromycin"],
        brands: &["Zithromax", "Biaxin", "Ery-Tab"],
    },
    DrugClass {
        name: "gabapentinoid",
        generics: &["Gabapentin", "Pregabalin"],
        brands: &["Neurontin", "Lyrica", "Gralise"],
    },
    DrugClass {
        name: "thyroid hormone",
        generics: &["Levothyroxine", "Liothyronine"],
        brands: &["Synthroid", "Levoxyl", "Cytomel", "Unithroid"],
    },
    DrugClass {
        name: "atypical antipsychotic",
        generics: &["Quetiapine", "Olanzapine", "Risperidone", "Aripiprazole"],
        brands: &["Seroquel", "Zyprexa", "Risperdal", "Abilify"],
    },
    DrugClass {
        name: "loop diuretic",
        generics: &["Furosemide", "Bumetanide", "Torsemide"],
        brands: &["Lasix", "Bumex", "Demadex"],
    },
];

/// Where a drug name sits in the formulary
pub struct DrugLookup {
    pub class: &'static DrugClass,
    pub is_brand: bool,
    pub canonical: &'static str,
}

/// Case-insensitive lookup of a drug name
pub fn lookup(name: &str) -> Option<DrugLookup> {
    CLASSES.iter().find_map(|class| {
        if let Some(g) = class.generics.iter().find(|g| g.eq_ignore_ascii_case(name)) {
            return Some(DrugLookup {
                class,
                is_brand: false,
                canonical: g,
            });
        }
        class
            .brands
            .iter()
            .find(|b| b.eq_ignore_ascii_case(name))
            .map(|b| DrugLookup {
                class,
                is_brand: true,
                canonical: b,
            })
    })
}

/// Every drug name, longest first so alternations prefer the full name
pub fn all_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = CLASSES
        .iter()
        .flat_map(|c| c.generics.iter().chain(c.brands.iter()).copied())
        .collect();
    names.sort_by_key(|n| std::cmp::Reverse(n.len()));
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lookup_case_insensitive() {
        let found = lookup("lisinopril").unwrap();
        assert_eq!(found.class.name, "ACE inhibitor");
        assert_eq!(found.canonical, "Lisinopril");
        assert!(!found.is_brand);

        let brand = lookup("LIPITOR").unwrap();
        assert_eq!(brand.class.name, "statin");
        assert!(brand.is_brand);

        assert!(lookup("aspirin tablet").is_none());
    }

    #[test]
    fn test_every_member_has_an_alternative() {
        for class in CLASSES {
            assert!(class.generics.len() >= 2, "{} generics", class.name);
            assert!(class.brands.len() >= 2, "{} brands", class.name);
        }
    }

    #[test]
    fn test_names_are_unique() {
        let names = all_names();
        let unique: HashSet<String> = names.iter().map(|n| n.to_lowercase()).collect();
        assert_eq!(unique.len(), names.len());
    }
}
