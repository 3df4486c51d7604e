//! Built-in seed content: a small bank for every collection, so the service
//! produces a usable (if short) exam with no external configuration.
//!
//! Bank files loaded at startup take precedence over these by id.

use serde_json::{json, Value};

use crate::content::{RawContentItem, RawParts};
use crate::domain::{MapPoint, MatchingPair};
use crate::store::Collection;

pub fn seed_content() -> Vec<(Collection, Vec<RawContentItem>)> {
  vec![
    (Collection::HistoryQuestions, history_questions()),
    (Collection::PoliticsQuestions, politics_questions()),
    (Collection::CultureQuestions, culture_questions()),
    (Collection::GeographyQuestions, geography_questions()),
    (Collection::ReadingLessons, reading_lessons()),
    (Collection::ListeningLessons, listening_lessons()),
    (Collection::SpeakingLessons, speaking_lessons()),
  ]
}

fn single(id: &str, question: &str, options: [&str; 4], correct: i64) -> RawContentItem {
  RawContentItem {
    id: id.into(),
    kind_tag: Some("SINGLE".into()),
    question: Some(question.into()),
    options: Some(options.iter().map(|o| o.to_string()).collect()),
    correct_answer_index: Some(correct),
    ..Default::default()
  }
}

fn multi(id: &str, question: &str, options: &[&str], correct: &[i64]) -> RawContentItem {
  RawContentItem {
    id: id.into(),
    kind_tag: Some("MULTI".into()),
    question: Some(question.into()),
    options: Some(options.iter().map(|o| o.to_string()).collect()),
    correct_indices: Some(correct.to_vec()),
    ..Default::default()
  }
}

// Legacy single-statement shape: "Σ" marks a true statement.
fn true_false(id: &str, statement: &str, correct: &str) -> RawContentItem {
  RawContentItem {
    id: id.into(),
    kind_tag: Some("TRUE_FALSE".into()),
    statement: Some(statement.into()),
    correct_answer: Some(correct.into()),
    ..Default::default()
  }
}

fn open(id: &str, prompt: &str, model_answer: &str) -> RawContentItem {
  RawContentItem {
    id: id.into(),
    kind_tag: Some("OPEN".into()),
    question: Some(prompt.into()),
    model_answer: Some(model_answer.into()),
    ..Default::default()
  }
}

fn with_order(mut item: RawContentItem, order: i64) -> RawContentItem {
  item.order = Some(json!(order));
  item
}

fn extras(pairs: Vec<(&str, Value)>) -> serde_json::Map<String, Value> {
  pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

fn history_questions() -> Vec<RawContentItem> {
  vec![
    single(
      "hist_seed_01",
      "Πότε ξεκίνησε η Ελληνική Επανάσταση;",
      ["Το 1821", "Το 1829", "Το 1843", "Το 1871"],
      0,
    ),
    single(
      "hist_seed_02",
      "Ποιος ήταν ο πρώτος Κυβερνήτης της Ελλάδας;",
      ["Ο Ιωάννης Καποδίστριας", "Ο Θεόδωρος Κολοκοτρώνης", "Ο Όθωνας", "Ο Ελευθέριος Βενιζέλος"],
      0,
    ),
    single(
      "hist_seed_03",
      "Τι γιορτάζουμε στις 28 Οκτωβρίου;",
      [
        "Την άρνηση στο ιταλικό τελεσίγραφο το 1940",
        "Την έναρξη της Επανάστασης του 1821",
        "Την απελευθέρωση της Αθήνας",
        "Την ένωση των Επτανήσων",
      ],
      0,
    ),
    single(
      "hist_seed_04",
      "Πότε έπεσε η Κωνσταντινούπολη;",
      ["Το 1453", "Το 1204", "Το 1522", "Το 1571"],
      0,
    ),
    true_false("hist_seed_05", "Η Μικρασιατική Καταστροφή έγινε το 1922.", "Σ"),
    true_false("hist_seed_06", "Η Μεταπολίτευση ξεκίνησε το 1967.", "Λ"),
    multi(
      "hist_seed_07",
      "Ποιοι από τους παρακάτω ήταν αγωνιστές του 1821;",
      &["Θεόδωρος Κολοκοτρώνης", "Γεώργιος Καραϊσκάκης", "Χαρίλαος Τρικούπης", "Λασκαρίνα Μπουμπουλίνα"],
      &[0, 1, 3],
    ),
  ]
}

fn politics_questions() -> Vec<RawContentItem> {
  vec![
    single(
      "pol_seed_01",
      "Πόσους βουλευτές έχει η Βουλή των Ελλήνων;",
      ["300", "250", "350", "400"],
      0,
    ),
    single(
      "pol_seed_02",
      "Ποιο είναι το πολίτευμα της Ελλάδας;",
      [
        "Προεδρευόμενη Κοινοβουλευτική Δημοκρατία",
        "Προεδρική Δημοκρατία",
        "Συνταγματική Μοναρχία",
        "Ομοσπονδιακή Δημοκρατία",
      ],
      0,
    ),
    single(
      "pol_seed_03",
      "Πότε έγινε η Ελλάδα μέλος της Ευρωπαϊκής Οικονομικής Κοινότητας;",
      ["Το 1981", "Το 1975", "Το 1992", "Το 2001"],
      0,
    ),
    single(
      "pol_seed_04",
      "Ποια είναι η θητεία του Προέδρου της Δημοκρατίας;",
      ["Πέντε χρόνια", "Τέσσερα χρόνια", "Έξι χρόνια", "Επτά χρόνια"],
      0,
    ),
    true_false("pol_seed_05", "Το δημοψήφισμα του 1974 κατήργησε τη βασιλεία.", "Σ"),
    true_false("pol_seed_06", "Ο Πρωθυπουργός εκλέγεται απευθείας από τον λαό.", "Λ"),
    multi(
      "pol_seed_07",
      "Ποια από τα παρακάτω είναι αρμοδιότητες της Βουλής;",
      &["Η ψήφιση των νόμων", "Η ψήφιση του προϋπολογισμού", "Η απονομή της δικαιοσύνης", "Ο κοινοβουλευτικός έλεγχος"],
      &[0, 1, 3],
    ),
  ]
}

fn culture_questions() -> Vec<RawContentItem> {
  vec![
    single(
      "cul_seed_01",
      "Ποιος έγραψε τον «Ύμνο εις την Ελευθερίαν»;",
      ["Ο Διονύσιος Σολωμός", "Ο Κωστής Παλαμάς", "Ο Ανδρέας Κάλβος", "Ο Γιάννης Ρίτσος"],
      0,
    ),
    single(
      "cul_seed_02",
      "Ποιο διπλό γεγονός γιορτάζεται στις 25 Μαρτίου;",
      [
        "Ο Ευαγγελισμός της Θεοτόκου και η έναρξη της Επανάστασης",
        "Τα Χριστούγεννα και η Πρωτοχρονιά",
        "Η Κοίμηση της Θεοτόκου και το Πάσχα",
        "Η ένωση της Κρήτης και ο Ευαγγελισμός",
      ],
      0,
    ),
    multi(
      "cul_seed_03",
      "Ποιοι Έλληνες ποιητές τιμήθηκαν με βραβείο Νόμπελ;",
      &["Γιώργος Σεφέρης", "Οδυσσέας Ελύτης", "Κωνσταντίνος Καβάφης", "Νίκος Καζαντζάκης"],
      &[0, 1],
    ),
    true_false("cul_seed_04", "Το Πάσχα είναι η μεγαλύτερη γιορτή της Ορθόδοξης Εκκλησίας.", "Σ"),
    open(
      "cul_seed_05",
      "Αναφέρετε δύο παραδοσιακά ελληνικά έθιμα και περιγράψτε σύντομα το ένα.",
      "Ενδεικτικά: το τσούγκρισμα των αυγών το Πάσχα, τα κάλαντα τα Χριστούγεννα, ο χορός στα πανηγύρια, το έθιμο της βασιλόπιτας με το φλουρί την Πρωτοχρονιά.",
    ),
  ]
}

fn geography_questions() -> Vec<RawContentItem> {
  vec![
    with_order(
      single(
        "geo_seed_01",
        "Ποιο είναι το μεγαλύτερο νησί της Ελλάδας;",
        ["Η Κρήτη", "Η Εύβοια", "Η Ρόδος", "Η Λέσβος"],
        0,
      ),
      10,
    ),
    with_order(
      single(
        "geo_seed_02",
        "Ποια είναι η πρωτεύουσα της Ελλάδας;",
        ["Η Αθήνα", "Η Θεσσαλονίκη", "Η Πάτρα", "Το Ηράκλειο"],
        0,
      ),
      20,
    ),
    with_order(
      true_false("geo_seed_03", "Ο Όλυμπος είναι το ψηλότερο βουνό της Ελλάδας.", "Σ"),
      40,
    ),
    with_order(
      RawContentItem {
        id: "geo_seed_04".into(),
        kind_tag: Some("MAP".into()),
        question: Some("Βρείτε τη Θεσσαλονίκη στον χάρτη.".into()),
        image_url: Some("/maps/greece.png".into()),
        points: Some(vec![MapPoint { x: 312.0, y: 108.0, label: "Θεσσαλονίκη".into() }]),
        tolerance: Some(json!(25)),
        ..Default::default()
      },
      55,
    ),
    with_order(
      RawContentItem {
        id: "geo_seed_05".into(),
        kind_tag: Some("MATCHING".into()),
        question: Some("Αντιστοιχίστε τις περιφέρειες με τις πρωτεύουσές τους.".into()),
        pairs: Some(vec![
          MatchingPair { left: "Κρήτη".into(), right: "Ηράκλειο".into() },
          MatchingPair { left: "Ήπειρος".into(), right: "Ιωάννινα".into() },
          MatchingPair { left: "Θεσσαλία".into(), right: "Λάρισα".into() },
        ]),
        ..Default::default()
      },
      65,
    ),
    // Curated top tier, outside both exam bands.
    with_order(
      single(
        "geo_seed_06",
        "Ποιος ποταμός αποτελεί φυσικό σύνορο της Ελλάδας με την Τουρκία;",
        ["Ο Έβρος", "Ο Αξιός", "Ο Νέστος", "Ο Στρυμόνας"],
        0,
      ),
      85,
    ),
  ]
}

fn reading_lessons() -> Vec<RawContentItem> {
  vec![
    RawContentItem {
      id: "read_seed_01".into(),
      parts: Some(RawParts {
        part_a: Some(vec![
          single(
            "read_seed_01_a1",
            "Πού βρίσκεται το καινούριο σπίτι της οικογένειας;",
            ["Στη Θεσσαλονίκη", "Στην Αθήνα", "Στα Ιωάννινα", "Στο Ηράκλειο"],
            0,
          ),
          single(
            "read_seed_01_a2",
            "Γιατί μετακόμισε η οικογένεια;",
            ["Για τη δουλειά του πατέρα", "Για τις σπουδές της κόρης", "Για λόγους υγείας", "Για το κλίμα"],
            0,
          ),
        ]),
        part_b: Some(vec![
          RawContentItem {
            id: "read_seed_01_b1".into(),
            kind_tag: Some("FILL_GAP".into()),
            text: Some("Συμπληρώστε τη λέξη που λείπει -> Η οικογένεια μετακόμισε στη ___ τον Σεπτέμβριο.".into()),
            correct_answers: Some(vec!["Θεσσαλονίκη".into()]),
            ..Default::default()
          },
          RawContentItem {
            id: "read_seed_01_b2".into(),
            kind_tag: Some("FILL_GAP".into()),
            text: Some("Συμπληρώστε τη λέξη που λείπει -> Ο πατέρας βρήκε ___ σε ένα εργοστάσιο.".into()),
            correct_answers: Some(vec!["δουλειά".into()]),
            ..Default::default()
          },
        ]),
      }),
      extra: extras(vec![
        ("title", json!("Η μετακόμιση")),
        (
          "text",
          json!("Η οικογένεια του κυρίου Νίκου μετακόμισε τον Σεπτέμβριο στη Θεσσαλονίκη, γιατί ο πατέρας βρήκε δουλειά σε ένα εργοστάσιο έξω από την πόλη. Τα παιδιά γράφτηκαν στο καινούριο σχολείο της γειτονιάς και η μητέρα συνεχίζει τα μαθήματα ελληνικών στο δημοτικό κέντρο."),
        ),
      ]),
      ..Default::default()
    },
    RawContentItem {
      id: "read_seed_02".into(),
      parts: Some(RawParts {
        part_a: Some(vec![single(
          "read_seed_02_a1",
          "Τι ανακοινώνει ο δήμος;",
          ["Δωρεάν μαθήματα ελληνικών", "Νέο πάρκο", "Αλλαγή δρομολογίων", "Πολιτιστικό φεστιβάλ"],
          0,
        )]),
        part_b: Some(vec![RawContentItem {
          id: "read_seed_02_b1".into(),
          kind_tag: Some("FILL_GAP".into()),
          text: Some("Συμπληρώστε με βάση την ανακοίνωση -> Οι εγγραφές γίνονται κάθε ___ στο δημαρχείο.".into()),
          correct_answers: Some(vec!["Τρίτη".into()]),
          ..Default::default()
        }]),
      }),
      extra: extras(vec![
        ("title", json!("Ανακοίνωση του δήμου")),
        (
          "text",
          json!("Ο δήμος ανακοινώνει δωρεάν μαθήματα ελληνικής γλώσσας για ενήλικες. Οι εγγραφές γίνονται κάθε Τρίτη στο δημαρχείο, από τις 9 το πρωί έως τις 2 το μεσημέρι."),
        ),
      ]),
      ..Default::default()
    },
  ]
}

fn listening_lessons() -> Vec<RawContentItem> {
  vec![
    RawContentItem {
      id: "listen_seed_01".into(),
      parts: Some(RawParts {
        // Sub-question kinds are forced during assembly; older records like
        // these carry no tags at all.
        part_a: Some(vec![RawContentItem {
          id: "listen_seed_01_a1".into(),
          question: Some("Πού δουλεύει η Ελένη;".into()),
          options: Some(vec![
            "Σε φαρμακείο".into(),
            "Σε σχολείο".into(),
            "Σε νοσοκομείο".into(),
            "Σε κατάστημα".into(),
          ]),
          correct_answer_index: Some(0),
          ..Default::default()
        }]),
        part_b: Some(vec![
          RawContentItem {
            id: "listen_seed_01_b1".into(),
            statement: Some("Η Ελένη τελειώνει τη δουλειά στις τρεις.".into()),
            correct_answer: Some("Σ".into()),
            ..Default::default()
          },
          RawContentItem {
            id: "listen_seed_01_b2".into(),
            statement: Some("Η Ελένη πηγαίνει στη δουλειά με το λεωφορείο.".into()),
            correct_answer: Some("Λ".into()),
            ..Default::default()
          },
        ]),
      }),
      extra: extras(vec![
        ("title", json!("Μια μέρα της Ελένης")),
        ("audioUrl", json!("/audio/listening/eleni.mp3")),
      ]),
      ..Default::default()
    },
    RawContentItem {
      id: "listen_seed_02".into(),
      parts: Some(RawParts {
        part_a: Some(vec![RawContentItem {
          id: "listen_seed_02_a1".into(),
          question: Some("Τι καιρό θα κάνει αύριο;".into()),
          options: Some(vec!["Βροχή".into(), "Λιακάδα".into(), "Χιόνι".into(), "Αέρα".into()]),
          correct_answer_index: Some(1),
          ..Default::default()
        }]),
        part_b: Some(vec![RawContentItem {
          id: "listen_seed_02_b1".into(),
          statement: Some("Το δελτίο καιρού είναι για το Σαββατοκύριακο.".into()),
          correct_answer: Some("Σ".into()),
          ..Default::default()
        }]),
      }),
      extra: extras(vec![
        ("title", json!("Δελτίο καιρού")),
        ("audioUrl", json!("/audio/listening/kairos.mp3")),
      ]),
      ..Default::default()
    },
  ]
}

fn speaking_lessons() -> Vec<RawContentItem> {
  vec![
    RawContentItem {
      id: "lesson_0".into(),
      order: Some(json!(0)),
      question: Some("Συστηθείτε: πείτε το όνομά σας, από πού είστε και πόσο καιρό ζείτε στην Ελλάδα.".into()),
      model_answer: Some("Ο υποψήφιος συστήνεται, αναφέρει τη χώρα καταγωγής του, πόσα χρόνια ζει στην Ελλάδα και λίγα λόγια για την οικογένεια ή τη δουλειά του.".into()),
      extra: extras(vec![("title", json!("Γνωριμία"))]),
      ..Default::default()
    },
    RawContentItem {
      id: "speak_seed_01".into(),
      order: Some(json!(10)),
      question: Some("Περιγράψτε τη γειτονιά σας. Τι σας αρέσει και τι θα θέλατε να αλλάξει;".into()),
      model_answer: Some("Περιγραφή της γειτονιάς με 2-3 στοιχεία (μαγαζιά, πάρκο, συγκοινωνίες), ένα θετικό και μία επιθυμητή αλλαγή, με απλή αιτιολόγηση.".into()),
      extra: extras(vec![("title", json!("Η γειτονιά μου"))]),
      ..Default::default()
    },
    RawContentItem {
      id: "speak_seed_02".into(),
      order: Some(json!(20)),
      question: Some("Ποια ελληνική γιορτή σας αρέσει περισσότερο και γιατί; Πώς τη γιορτάζετε;".into()),
      model_answer: Some("Αναφορά σε μία γιορτή (π.χ. Πάσχα, 25η Μαρτίου), δύο λόγοι προτίμησης και σύντομη περιγραφή του πώς τη γιορτάζει ο υποψήφιος.".into()),
      extra: extras(vec![("title", json!("Γιορτές"))]),
      ..Default::default()
    },
  ]
}
