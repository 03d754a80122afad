//! Built-in stopword lists

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::config::Language;

const ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will",
    "just", "don", "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren",
    "couldn", "didn", "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn", "mustn",
    "needn", "shan", "shouldn", "wasn", "weren", "won", "wouldn",
];

const FRENCH: &[&str] = &[
    "au", "aux", "avec", "ce", "ces", "dans", "de", "des", "du", "elle", "en", "et", "eux",
    "il", "ils", "je", "la", "le", "les", "leur", "leurs", "lui", "ma", "mais", "me",
    "même", "mes", "moi", "mon", "ne", "nos", "notre", "nous", "on", "ou", "par", "pas",
    "pour", "qu", "que", "qui", "sa", "se", "ses", "son", "sur", "ta", "te", "tes", "toi",
    "ton", "tu", "un", "une", "vos", "votre", "vous", "c", "d", "j", "l", "à", "m", "n",
    "s", "t", "y", "été", "étée", "étées", "étés", "étant", "suis", "es", "est", "sommes",
    "êtes", "sont", "serai", "seras", "sera", "serons", "serez", "seront", "serais",
    "serait", "serions", "seriez", "seraient", "étais", "était", "étions", "étiez",
    "étaient", "fus", "fut", "fûmes", "fûtes", "furent", "sois", "soit", "soyons", "soyez",
    "soient", "fusse", "fusses", "fût", "fussions", "fussiez", "fussent", "ayant", "eu",
    "eue", "eues", "eus", "ai", "as", "avons", "avez", "ont", "aurai", "auras", "aura",
    "aurons", "aurez", "auront", "aurais", "aurait", "aurions", "auriez", "auraient",
    "avais", "avait", "avions", "aviez", "avaient", "eut", "eûmes", "eûtes", "eurent",
    "aie", "aies", "ait", "ayons", "ayez", "aient", "eusse", "eusses", "eût", "eussions",
    "eussiez", "eussent", "ceci", "cela", "cet", "cette", "ici", "quel", "quels", "quelle",
    "quelles", "sans", "soi",
];

const GERMAN: &[&str] = &[
    "aber", "alle", "allem", "allen", "aller", "alles", "als", "also", "am", "an", "ander",
    "andere", "anderem", "anderen", "anderer", "anderes", "anderm", "andern", "anders",
    "auch", "auf", "aus", "bei", "bin", "bis", "bist", "da", "damit", "dann", "der", "den",
    "des", "dem", "die", "das", "dass", "daß", "derselbe", "derselben", "denselben",
    "desselben", "demselben", "dieselbe", "dieselben", "dasselbe", "dazu", "dein", "deine",
    "deinem", "deinen", "deiner", "deines", "denn", "derer", "dessen", "dich", "dir", "du",
    "dies", "diese", "diesem", "diesen", "dieser", "dieses", "doch", "dort", "durch", "ein",
    "eine", "einem", "einen", "einer", "eines", "einig", "einige", "einigem", "einigen",
    "einiger", "einiges", "einmal", "er", "ihn", "ihm", "es", "etwas", "euer", "eure",
    "eurem", "euren", "eurer", "eures", "für", "gegen", "gewesen", "hab", "habe", "haben",
    "hat", "hatte", "hatten", "hier", "hin", "hinter", "ich", "mich", "mir", "ihr", "ihre",
    "ihrem", "ihren", "ihrer", "ihres", "euch", "im", "in", "indem", "ins", "ist", "jede",
    "jedem", "jeden", "jeder", "jedes", "jene", "jenem", "jenen", "jener", "jenes", "jetzt",
    "kann", "kein", "keine", "keinem", "keinen", "keiner", "keines", "können", "könnte",
    "machen", "man", "manche", "manchem", "manchen", "mancher", "manches", "mein", "meine",
    "meinem", "meinen", "meiner", "meines", "mit", "muss", "musste", "nach", "nicht",
    "nichts", "noch", "nun", "nur", "ob", "oder", "ohne", "sehr", "sein", "seine", "seinem",
    "seinen", "seiner", "seines", "selbst", "sich", "sie", "ihnen", "sind", "so", "solche",
    "solchem", "solchen", "solcher", "solches", "soll", "sollte", "sondern", "sonst",
    "über", "um", "und", "uns", "unsere", "unserem", "unseren", "unser", "unseres", "unter",
    "viel", "vom", "von", "vor", "während", "war", "waren", "warst", "was", "weg", "weil",
    "weiter", "welche", "welchem", "welchen", "welcher", "welches", "wenn", "werde",
    "werden", "wie", "wieder", "will", "wir", "wird", "wirst", "wo", "wollen", "wollte",
    "würde", "würden", "zu", "zum", "zur", "zwar", "zwischen",
];

const SPANISH: &[&str] = &[
    "de", "la", "que", "el", "en", "y", "a", "los", "del", "se", "las", "por", "un", "para",
    "con", "no", "una", "su", "al", "lo", "como", "más", "pero", "sus", "le", "ya", "o",
    "este", "sí", "porque", "esta", "entre", "cuando", "muy", "sin", "sobre", "también",
    "me", "hasta", "hay", "donde", "quien", "desde", "todo", "nos", "durante", "todos",
    "uno", "les", "ni", "contra", "otros", "ese", "eso", "ante", "ellos", "e", "esto", "mí",
    "antes", "algunos", "qué", "unos", "yo", "otro", "otras", "otra", "él", "tanto", "esa",
    "estos", "mucho", "quienes", "nada", "muchos", "cual", "poco", "ella", "estar", "estas",
    "algunas", "algo", "nosotros", "mi", "mis", "tú", "te", "ti", "tu", "tus", "ellas",
    "nosotras", "vosotros", "vosotras", "os", "mío", "mía", "míos", "mías", "tuyo", "tuya",
    "tuyos", "tuyas", "suyo", "suya", "suyos", "suyas", "nuestro", "nuestra", "nuestros",
    "nuestras", "vuestro", "vuestra", "vuestros", "vuestras", "esos", "esas", "estoy",
    "estás", "está", "estamos", "estáis", "están", "esté", "estés", "estemos", "estéis",
    "estén", "estaba", "estabas", "estábamos", "estaban", "estuve", "estuvo", "estuvieron",
    "he", "has", "ha", "hemos", "habéis", "han", "haya", "había", "habían", "hube", "hubo",
    "soy", "eres", "es", "somos", "sois", "son", "sea", "sean", "era", "eras", "éramos",
    "eran", "fui", "fue", "fuimos", "fueron", "tengo", "tienes", "tiene", "tenemos",
    "tenéis", "tienen", "tenía", "tenían", "tuve", "tuvo",
];

const ITALIAN: &[&str] = &[
    "ad", "al", "allo", "ai", "agli", "all", "agl", "alla", "alle", "con", "col", "coi",
    "da", "dal", "dallo", "dai", "dagli", "dall", "dagl", "dalla", "dalle", "di", "del",
    "dello", "dei", "degli", "dell", "degl", "della", "delle", "in", "nel", "nello", "nei",
    "negli", "nell", "negl", "nella", "nelle", "su", "sul", "sullo", "sui", "sugli", "sull",
    "sugl", "sulla", "sulle", "per", "tra", "contro", "io", "tu", "lui", "lei", "noi",
    "voi", "loro", "mio", "mia", "miei", "mie", "tuo", "tua", "tuoi", "tue", "suo", "sua",
    "suoi", "sue", "nostro", "nostra", "nostri", "nostre", "vostro", "vostra", "vostri",
    "vostre", "mi", "ti", "ci", "vi", "lo", "la", "li", "le", "gli", "ne", "il", "un",
    "uno", "una", "ma", "ed", "se", "perché", "anche", "come", "dov", "dove", "che", "chi",
    "cui", "non", "più", "quale", "quanto", "quanti", "quanta", "quante", "quello",
    "quelli", "quella", "quelle", "questo", "questi", "questa", "queste", "si", "tutto",
    "tutti", "a", "c", "e", "i", "l", "o", "ho", "hai", "ha", "abbiamo", "avete", "hanno",
    "abbia", "avevo", "aveva", "avevano", "ebbe", "sono", "sei", "è", "siamo", "siete",
    "era", "erano", "fu", "furono", "sia", "essere", "fui", "stato", "stata",
];

const PORTUGUESE: &[&str] = &[
    "de", "a", "o", "que", "e", "do", "da", "em", "um", "para", "com", "não", "uma", "os",
    "no", "se", "na", "por", "mais", "as", "dos", "como", "mas", "ao", "ele", "das", "à",
    "seu", "sua", "ou", "quando", "muito", "nos", "já", "eu", "também", "só", "pelo",
    "pela", "até", "isso", "ela", "entre", "depois", "sem", "mesmo", "aos", "seus", "quem",
    "nas", "me", "esse", "eles", "você", "essa", "num", "nem", "suas", "meu", "às", "minha",
    "numa", "pelos", "elas", "qual", "nós", "lhe", "deles", "essas", "esses", "pelas",
    "este", "dele", "tu", "te", "vocês", "vos", "lhes", "meus", "minhas", "teu", "tua",
    "teus", "tuas", "nosso", "nossa", "nossos", "nossas", "dela", "delas", "esta", "estes",
    "estas", "aquele", "aquela", "aqueles", "aquelas", "isto", "aquilo", "estou", "está",
    "estamos", "estão", "estive", "esteve", "estivemos", "estiveram", "estava", "estávamos",
    "estavam", "hei", "há", "havemos", "hão", "houve", "sou", "somos", "são", "era", "eram",
    "fui", "foi", "fomos", "foram", "seja", "sejam", "tenho", "tem", "temos", "têm",
    "tinha", "tinham", "tive", "teve", "tiveram", "ser",
];

const ROMANIAN: &[&str] = &[
    "a", "acea", "aceasta", "această", "aceea", "acei", "aceia", "acel", "acela", "acele",
    "acelea", "acest", "acesta", "aceste", "acestea", "acestei", "acestia", "acestui",
    "aceşti", "acești", "aceştia", "aceștia", "acum", "adica", "al", "ale", "alt", "alta",
    "altceva", "alte", "altfel", "alti", "alţi", "alți", "am", "are", "as", "aş", "aș",
    "asta", "astazi", "astăzi", "au", "avea", "avem", "aveţi", "aveți", "azi", "ba", "bine",
    "ca", "că", "cand", "când", "care", "ce", "cel", "cea", "cei", "cele", "cine", "cu",
    "cum", "da", "dacă", "dar", "de", "deci", "deja", "din", "dintre", "doar", "după", "ea",
    "ei", "el", "ele", "era", "este", "eu", "fi", "fie", "fiecare", "fost", "foarte",
    "fără", "îi", "îl", "îmi", "în", "înainte", "între", "îşi", "își", "la", "le", "li",
    "lor", "lui", "mai", "mea", "mei", "mele", "meu", "mi", "mult", "multe", "ne", "ni",
    "nici", "nimic", "noi", "nostru", "nu", "o", "ori", "pe", "pentru", "peste", "poate",
    "prin", "sa", "să", "sau", "se", "si", "şi", "și", "sunt", "sînt", "tot", "toate",
    "toti", "toţi", "toți", "tu", "un", "una", "unde", "unei", "unor", "unui", "va", "vă",
    "voi", "vom", "vor",
];

fn to_set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|s| s.to_string()).collect()
}

static ENGLISH_STOPWORDS: Lazy<HashSet<String>> = Lazy::new(|| to_set(ENGLISH));
static FRENCH_STOPWORDS: Lazy<HashSet<String>> = Lazy::new(|| to_set(FRENCH));
static GERMAN_STOPWORDS: Lazy<HashSet<String>> = Lazy::new(|| to_set(GERMAN));
static SPANISH_STOPWORDS: Lazy<HashSet<String>> = Lazy::new(|| to_set(SPANISH));
static ITALIAN_STOPWORDS: Lazy<HashSet<String>> = Lazy::new(|| to_set(ITALIAN));
static PORTUGUESE_STOPWORDS: Lazy<HashSet<String>> = Lazy::new(|| to_set(PORTUGUESE));
static ROMANIAN_STOPWORDS: Lazy<HashSet<String>> = Lazy::new(|| to_set(ROMANIAN));

/// Built-in stopwords for `language`
pub fn builtin(language: Language) -> HashSet<String> {
    let words = match language {
        Language::English => &ENGLISH_STOPWORDS,
        Language::French => &FRENCH_STOPWORDS,
        Language::German => &GERMAN_STOPWORDS,
        Language::Spanish => &SPANISH_STOPWORDS,
        Language::Italian => &ITALIAN_STOPWORDS,
        Language::Portuguese => &PORTUGUESE_STOPWORDS,
        Language::Romanian => &ROMANIAN_STOPWORDS,
    };
    HashSet::clone(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_list() {
        let words = builtin(Language::English);
        assert!(words.contains("the"));
        assert!(words.contains("over"));
        assert!(!words.contains("cat"));
    }

    #[test]
    fn test_every_language_has_a_list() {
        let samples = [
            (Language::French, "les"),
            (Language::German, "und"),
            (Language::Spanish, "los"),
            (Language::Italian, "della"),
            (Language::Portuguese, "não"),
            (Language::Romanian, "și"),
        ];
        for (language, word) in samples {
            let words = builtin(language);
            assert!(words.len() > 50, "{} list too short", language.name());
            assert!(words.contains(word), "{} missing {}", language.name(), word);
        }
    }

    #[test]
    fn test_lists_are_lowercase_words() {
        for language in [Language::French, Language::German, Language::Romanian] {
            for word in builtin(language) {
                assert_eq!(word, word.to_lowercase());
                assert!(word.chars().all(char::is_alphabetic), "{}", word);
            }
        }
    }
}
