//! Fixed prose used by the enricher: per-field fallback texts for empty
//! slots, context phrase sets for padding, and the closing clause used
//! after a clause-aware trim. All entries are complete Arabic phrases
//! that read naturally when appended after a clause.

use rand::Rng;

use super::fields::FieldKind;

/// A padding phrase set selected by report-type keywords.
struct ContextSet {
    keywords: &'static [&'static str],
    phrases: &'static [&'static str],
}

/// Keyword-routed phrase sets. First match wins; the hint is matched
/// case-insensitively so Latin keywords work too.
static CONTEXT_SETS: &[ContextSet] = &[
    ContextSet {
        keywords: &["قرآن", "حفظ", "تلاوة", "تجويد", "quran"],
        phrases: &[
            "مع الالتزام بأحكام التجويد أثناء التلاوة",
            "ومراجعة المقاطع المحفوظة سابقاً بشكل دوري",
            "بما يرسخ الحفظ ويحسن جودة الأداء",
            "مع العناية بمخارج الحروف وصفاتها",
            "والاستماع إلى القراء المتقنين لتثبيت الحفظ",
        ],
    },
    ContextSet {
        keywords: &[
            "أكاديمي", "دراسي", "تحصيل", "مادة", "رياضيات", "علوم", "لغة", "academic",
        ],
        phrases: &[
            "مع التركيز على رفع مستوى التحصيل الدراسي",
            "من خلال حل التدريبات والواجبات الصفية بانتظام",
            "بما يدعم استيعاب المفاهيم الأساسية للمادة",
            "مع متابعة الأداء في الاختبارات القصيرة",
            "وتوظيف المهارات المكتسبة في مواقف تعليمية جديدة",
        ],
    },
    ContextSet {
        keywords: &["سلوك", "انضباط", "أخلاق", "تعامل", "behavior"],
        phrases: &[
            "مع تعزيز السلوك الإيجابي داخل الصف",
            "والالتزام بقواعد السلوك والمواظبة المدرسية",
            "بما ينمي روح الاحترام والتعاون مع الزملاء",
            "مع متابعة الانضباط الذاتي في المواقف المختلفة",
        ],
    },
    ContextSet {
        keywords: &["مهار", "تدريب", "تطبيق", "skill"],
        phrases: &[
            "مع التدرب العملي على المهارات المستهدفة",
            "وتطبيق ما تم تعلمه في أنشطة متنوعة",
            "بما يعزز الثقة بالنفس عند الأداء",
            "مع قياس التقدم في كل مهارة على حدة",
        ],
    },
];

/// Used when no report-type keyword matches.
static GENERIC_PHRASES: &[&str] = &[
    "مع الحرص على تحقيق الأهداف التربوية المنشودة",
    "بما يعكس التزام الطالب بمتطلبات المرحلة",
    "في إطار خطة المتابعة المعتمدة خلال الفصل",
    "مع مراعاة الفروق الفردية في الأداء",
    "بالتعاون المستمر بين المعلم وولي الأمر",
    "وفق معايير التقييم المعتمدة في المدرسة",
];

/// Longer lead phrases, appended before the padding loop when the input
/// is very short so the result does not read as a list of fillers.
pub static HIGH_VALUE_PHRASES: &[&str] = &[
    "وقد ظهر ذلك بوضوح من خلال الملاحظة المستمرة لأداء الطالب داخل الصف",
    "ويأتي ذلك ضمن خطة متابعة فردية تراعي قدرات الطالب واحتياجاته",
    "وهو ما تؤكده نتائج التقييمات الدورية التي أجريت خلال هذه الفترة",
    "مع الأخذ في الاعتبار مستوى الطالب في بداية الفترة ومقدار تقدمه",
];

/// Fixed five-word tail placed after a clause-aware trim.
pub const CLOSING_CLAUSE: &str = "مع الاستمرار في المتابعة والدعم";

/// Select the padding phrase set for a free-form report-type hint.
pub fn phrase_set_for(report_type: &str) -> &'static [&'static str] {
    let hint = report_type.to_lowercase();
    for set in CONTEXT_SETS {
        if set.keywords.iter().any(|k| hint.contains(k)) {
            return set.phrases;
        }
    }
    GENERIC_PHRASES
}

/// Fallback texts per field. Deliberately shorter than the standard
/// word band; the enricher pads them with context phrases, so two
/// reports with empty model output still differ.
fn fallback_options(kind: FieldKind) -> &'static [&'static str] {
    match kind {
        FieldKind::Goal => &[
            "متابعة مستوى الطالب وتطوير مهاراته الأساسية خلال هذه الفترة الدراسية وتحقيق الأهداف التعليمية المقررة",
            "رصد تقدم الطالب في المهارات المستهدفة ودعم جوانب القوة لديه ومعالجة جوانب الاحتياج",
        ],
        FieldKind::Summary => &[
            "أظهر الطالب خلال هذه الفترة مستوى جيداً في أغلب المهارات مع تفاوت بسيط في بعض الجوانب",
            "كان أداء الطالب خلال الفترة مستقراً بشكل عام مع مؤشرات واضحة على التحسن التدريجي",
        ],
        FieldKind::Steps => &[
            "تم تنفيذ مجموعة من الأنشطة والتدريبات المتدرجة مع متابعة يومية لمستوى الإنجاز",
            "جرى تقسيم الأهداف إلى مهام قصيرة قابلة للقياس مع مراجعة أسبوعية للنتائج",
        ],
        FieldKind::Strategies => &[
            "استخدام التعزيز الإيجابي والتعلم التعاوني وتنويع الأنشطة بما يناسب أسلوب تعلم الطالب",
            "اعتماد التكرار الموزع والتقييم المستمر وربط التعلم بمواقف حياتية قريبة من الطالب",
        ],
        FieldKind::Strengths => &[
            "يتميز الطالب بالالتزام بالحضور والتفاعل الإيجابي مع المعلم والرغبة الواضحة في التعلم",
            "يمتلك الطالب قدرة جيدة على الفهم والاستيعاب مع حرص ملحوظ على إتقان المطلوب",
        ],
        FieldKind::Improve => &[
            "يحتاج الطالب إلى مزيد من التركيز أثناء الشرح وتنظيم وقت المذاكرة في المنزل",
            "ينبغي العمل على زيادة الثقة بالنفس عند المشاركة وتقليل التردد في الإجابة",
        ],
        FieldKind::Recommendations => &[
            "نوصي بالمتابعة المنزلية المنتظمة وتخصيص وقت يومي قصير للمراجعة والتواصل المستمر مع المعلم",
            "نوصي بتشجيع الطالب على المشاركة وتعزيز إنجازاته أمام زملائه ومواصلة التدريب المنزلي",
        ],
    }
}

/// Random fallback text for an empty field.
pub fn fallback_for(kind: FieldKind, rng: &mut impl Rng) -> &'static str {
    let options = fallback_options(kind);
    options[rng.gen_range(0..options.len())]
}
