//! The built-in table of Valencian monosyllables with a diacritic accent.

use crate::lexicon::{Lexicon, PairTable, WordEntry};

#[derive(Copy, Clone)]
struct Seed {
    word: &'static str,
    category: &'static str,
    definition: &'static str,
    examples: &'static [&'static str],
}

/// Accented form first.
pub(crate) const PAIRS: &[(&str, &str)] = &[
    ("bé", "be"),
    ("déu", "deu"),
    ("és", "es"),
    ("mà", "ma"),
    ("més", "mes"),
    ("món", "mon"),
    ("pèl", "pel"),
    ("què", "que"),
    ("sé", "se"),
    ("sòl", "sol"),
    ("són", "son"),
    ("té", "te"),
    ("ús", "us"),
    ("vós", "vos"),
    ("sí", "si"),
];

const WORDS: &[Seed] = &[
    Seed {
        word: "sí",
        category: "adverbi d'afirmació",
        definition: "Adverbi d’afirmació.",
        examples: &[
            "Sí, vindré demà.",
            "Va dir que sí a la proposta.",
            "Sí que ho sabia.",
            "I tant que sí!",
            "Sí, estic d’acord amb tu.",
            "Sí, és veritat.",
        ],
    },
    Seed {
        word: "si",
        category: "conjunció condicional",
        definition: "Conjunció condicional.",
        examples: &[
            "Si plou, ens quedem a casa.",
            "Si estudies, aprovaràs.",
            "Si vols, t’ajude.",
            "Si tens temps, vine demà.",
            "Si no ho proves, mai ho sabràs.",
        ],
    },
    Seed {
        word: "més",
        category: "quantificador/comparatiu",
        definition: "Comparatiu de quantitat (‘més = más’).",
        examples: &[
            "Vull més aigua.",
            "Açò és més car que allò.",
            "Necessitem més temps.",
            "Cada dia estudie més hores.",
            "Vol més cafè al matí.",
            "Hi ha més gent a la plaça hui.",
        ],
    },
    Seed {
        word: "mes",
        category: "nom (mes del calendari)",
        definition: "Nom del calendari.",
        examples: &[
            "El mes de juny fa calor.",
            "Cada mes estalvie un poc.",
            "Aquest mes començarem.",
            "El pròxim mes hi haurà vacances.",
            "És el mes més llarg de l’any.",
        ],
    },
    Seed {
        word: "bé",
        category: "adverbi",
        definition: "Adverbi (‘bé = bien’).",
        examples: &[
            "Estic bé, gràcies.",
            "Fes-ho bé, si us plau.",
            "No m’ha paregut bé.",
            "Treballa molt bé sota pressió.",
            "Tot ha eixit bé al final.",
        ],
    },
    Seed {
        word: "be",
        category: "nom (animal jove)",
        definition: "Nom: ‘corder’, ‘ovella jove’.",
        examples: &[
            "Va comprar un be al mercat.",
            "El be pastura al camp.",
            "Han nascut dos bens.",
            "El be balava sense parar.",
            "El pastor cuidava un be malalt.",
        ],
    },
    Seed {
        word: "déu",
        category: "nom propi (entitat divina)",
        definition: "Nom: ‘déu = dios’.",
        examples: &[
            "Crec en un sol Déu.",
            "El Déu dels antics era venerat.",
            "La gent resava al seu Déu.",
            "Van construir un temple dedicat a Déu.",
            "Déu és omnipotent segons la fe.",
        ],
    },
    Seed {
        word: "deu",
        category: "numeral / forma de ‘deure’",
        definition: "Nombre ‘deu = diez’ o forma de ‘deure’ (ha/han de).",
        examples: &[
            "En té deu cromos.",
            "Deu estudiar més per a aprovar.",
            "Deu ser tard.",
            "Han arribat deu persones.",
            "Deu treballar molt per aconseguir-ho.",
        ],
    },
    Seed {
        word: "és",
        category: "verb ‘ser’ (3a sing.)",
        definition: "Forma verbal del verb ‘ser’.",
        examples: &[
            "Ell és professor.",
            "La casa és gran.",
            "És evident.",
            "El llibre és interessant.",
            "És massa tard per eixir.",
            "És el meu millor amic.",
        ],
    },
    Seed {
        word: "es",
        category: "pronom",
        definition: "Pronom personal.",
        examples: &[
            "Es pentina cada matí.",
            "Es va caure al terra.",
            "Es mira al mirall.",
            "Es van saludar cordialment.",
            "Es va vestir ràpidament.",
        ],
    },
    Seed {
        word: "mà",
        category: "nom (part del cos)",
        definition: "Part del cos (‘mà = mano’).",
        examples: &[
            "La mà em fa mal.",
            "Agafa’m de la mà.",
            "Dóna’m la mà.",
            "Alça la mà per preguntar.",
            "Va escriure amb la mà esquerra.",
        ],
    },
    Seed {
        word: "ma",
        category: "adjectiu possessiu",
        definition: "Adjectiu possessiu (‘ma = mi’).",
        examples: &[
            "Ma casa és la teua.",
            "Ma mare treballa ací.",
            "Ma germana vindrà.",
            "Ma terra és especial per a mi.",
            "Ma família viu al poble.",
        ],
    },
    Seed {
        word: "món",
        category: "nom",
        definition: "‘Món = mundo’.",
        examples: &[
            "El món és gran.",
            "Viatjar pel món és enriquidor.",
            "És el meu món.",
            "El món canvia ràpidament.",
            "Tot el món ho sap.",
        ],
    },
    Seed {
        word: "mon",
        category: "possessiu arcaic",
        definition: "Possessiu arcaic (‘mon = mi’).",
        examples: &[
            "Mon pare treballa al camp.",
            "Mon oncle viu lluny.",
            "Mon cosí és menut.",
            "Mon avi sempre conta històries.",
            "Mon germà juga al futbol.",
        ],
    },
    Seed {
        word: "pèl",
        category: "nom",
        definition: "‘Pèl = pelo, cabell’ (filament).",
        examples: &[
            "Tens un pèl al jersei.",
            "El gat ha deixat pèl al sofà.",
            "Se m’ha caigut un pèl.",
        ],
    },
    Seed {
        word: "pel",
        category: "contracció (‘per el’)",
        definition: "Contracció de ‘per el’.",
        examples: &[
            "Passe pel carrer major.",
            "Vaig pel camí antic.",
            "Mira pel finestral.",
        ],
    },
    Seed {
        word: "què",
        category: "pronom interrogatiu/exclamatiu",
        definition: "Pronom interrogatiu/exclamatiu.",
        examples: &["Què vols menjar?", "Mira què ha passat!", "Què tal estàs?"],
    },
    Seed {
        word: "que",
        category: "conjunció / pronom relatiu",
        definition: "Conjunció o pronom relatiu.",
        examples: &[
            "Pensa que vindrà.",
            "El llibre que llegisc és interessant.",
            "Diuen que plourà.",
        ],
    },
    Seed {
        word: "sé",
        category: "verb ‘saber’ (1a sing.)",
        definition: "Forma verbal de ‘saber’.",
        examples: &["Jo sé la resposta.", "No sé què dir-te.", "Sé que tens raó."],
    },
    Seed {
        word: "se",
        category: "pronom",
        definition: "Pronom personal.",
        examples: &[
            "Se’n va anar de pressa.",
            "Se sent feliç.",
            "Se’n recorda sovint.",
        ],
    },
    Seed {
        word: "sòl",
        category: "nom (terra ferma/suelo)",
        definition: "‘Sòl = suelo, terra ferma’.",
        examples: &[
            "El sòl està mullat.",
            "No poses això al sòl.",
            "El sòl és irregular.",
        ],
    },
    Seed {
        word: "sol",
        category: "nom (astre) / adjectiu (‘sol = a soles’)",
        definition: "Nom (astre ‘sol’) o adjectiu (‘sol = solo’).",
        examples: &["El sol brilla.", "Estic sol a casa.", "Prefereix estar sol."],
    },
    Seed {
        word: "són",
        category: "verb ‘ser’ (3a pl.)",
        definition: "Forma verbal de ‘ser’ (3a persona plural).",
        examples: &["Ells són amics.", "Les cases són grans.", "Són ben educats."],
    },
    Seed {
        word: "son",
        category: "nom (somnolència)",
        definition: "‘Son = sueño, ganes de dormir’.",
        examples: &["Tinc son.", "El bebé té son.", "Em fa son llegir."],
    },
    Seed {
        word: "té",
        category: "verb ‘tindre’ (3a sing.)",
        definition: "Forma verbal de ‘tindre’.",
        examples: &["Ella té un cotxe.", "El xic té gana.", "Té pressa."],
    },
    Seed {
        word: "te",
        category: "pronom / nom (beguda)",
        definition: "Pronom (‘a tu’) o beguda (‘te’).",
        examples: &[
            "Això és per a te.",
            "Vull un te calent.",
            "El te verd m’agrada.",
        ],
    },
    Seed {
        word: "ús",
        category: "nom",
        definition: "‘Ús = utilización’ d’alguna cosa.",
        examples: &[
            "L’ús del mòbil està regulat.",
            "Fa ús del diccionari.",
            "En limita l’ús.",
        ],
    },
    Seed {
        word: "us",
        category: "pronom (a vosaltres)",
        definition: "Pronom personal (‘a vosaltres’).",
        examples: &[
            "Us espere a la porta.",
            "Ja us he vist.",
            "Us ho explique després.",
        ],
    },
    Seed {
        word: "vós",
        category: "pronom de cortesia",
        definition: "Pronom personal de cortesia.",
        examples: &["Vós sou benvingut.", "Com esteu, vós?", "Gràcies a vós."],
    },
    Seed {
        word: "vos",
        category: "pronom (a vosaltres)",
        definition: "Pronom personal (‘a vosaltres’).",
        examples: &["Vos estime molt.", "Vos ajudaré en tot.", "Vos ho diré demà."],
    },
];

impl Seed {
    fn entry(&self) -> WordEntry {
        WordEntry {
            word: self.word.to_owned(),
            category: Some(self.category.to_owned()),
            definition: self.definition.to_owned(),
            examples: self.examples.iter().map(|example| example.to_string()).collect(),
        }
    }
}

impl Lexicon {
    pub fn builtin() -> Self {
        let entries = WORDS.iter().map(Seed::entry).collect();
        Self::from_validated(entries, PairTable::from_trusted(PAIRS))
    }
}
