//! Field extraction from numbered model output.
//!
//! The model is asked for seven numbered sections but is free to answer
//! in Latin (`3.`, `3)`, `3-`) or Arabic-Indic (`٣.`) numbering, wrap
//! sections across lines, or omit sections entirely. The scanner walks
//! trimmed lines once: a line whose first characters form an ordinal
//! marker for slot 1..=7 opens that slot; any other non-empty line while
//! a slot is open continues it. Text before the first marker is
//! discarded, and a later marker for the same slot overwrites the
//! earlier content.

/// Separators accepted after a Latin digit. Arabic-Indic digits pair
/// with `.` only, matching how the model numbers Arabic output.
const LATIN_SEPARATORS: [char; 3] = ['.', ')', '-'];

/// Extract the seven slots from raw text. Entries for unopened slots are
/// left empty; enrichment fills them later. Extraction never invents
/// content.
pub fn extract_fields(raw: &str) -> [String; 7] {
    let mut slots: [String; 7] = Default::default();
    let mut open: Option<usize> = None;
    let mut buffer: Vec<String> = Vec::new();

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some((slot, remainder)) = opening_marker(line) {
            flush(&mut slots, open, &mut buffer);
            open = Some(slot);
            if !remainder.is_empty() {
                buffer.push(remainder.to_string());
            }
        } else if open.is_some() {
            buffer.push(line.to_string());
        }
        // Before the first marker there is nothing to attach lines to.
    }
    flush(&mut slots, open, &mut buffer);

    slots
}

/// Recognize an ordinal marker at the start of a trimmed line.
///
/// Returns the 0-based slot and the remainder after the separator.
/// Digits outside 1..=7 and digits with an unexpected separator do not
/// open anything; the caller treats such lines as continuations.
fn opening_marker(line: &str) -> Option<(usize, &str)> {
    let mut chars = line.chars();
    let digit = chars.next()?;
    let slot = match digit {
        '1'..='7' => digit as usize - '1' as usize,
        '١'..='٧' => (digit as u32 - '١' as u32) as usize,
        _ => return None,
    };

    let rest = chars.as_str();
    let separator = rest.chars().next()?;
    let accepted = if digit.is_ascii_digit() {
        LATIN_SEPARATORS.contains(&separator)
    } else {
        separator == '.'
    };
    if !accepted {
        return None;
    }

    Some((slot, rest[separator.len_utf8()..].trim_start()))
}

/// Close the open slot: join its buffered lines with single spaces.
fn flush(slots: &mut [String; 7], open: Option<usize>, buffer: &mut Vec<String>) {
    if let Some(slot) = open {
        slots[slot] = buffer.join(" ").trim().to_string();
    }
    buffer.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fields::FieldKind;

    fn field(slots: &[String; 7], kind: FieldKind) -> &str {
        &slots[kind.slot() - 1]
    }

    #[test]
    fn extracts_all_seven_latin_fields() {
        let raw = "\
1. تطوير مهارات الطالب الأساسية
2. أظهر الطالب تقدماً ملحوظاً
3. تم تنفيذ خطة المتابعة
4. استخدام التعزيز الإيجابي
5. الالتزام والانضباط
6. يحتاج إلى تحسين التركيز
7. نوصي بالمتابعة المنزلية";
        let slots = extract_fields(raw);
        assert_eq!(field(&slots, FieldKind::Goal), "تطوير مهارات الطالب الأساسية");
        assert_eq!(field(&slots, FieldKind::Summary), "أظهر الطالب تقدماً ملحوظاً");
        assert_eq!(field(&slots, FieldKind::Recommendations), "نوصي بالمتابعة المنزلية");
        assert!(slots.iter().all(|s| !s.is_empty()));
    }

    #[test]
    fn extracts_arabic_indic_markers() {
        let raw = "١. الهدف الأول\n٢. ملخص الأداء\n٧. التوصيات النهائية";
        let slots = extract_fields(raw);
        assert_eq!(field(&slots, FieldKind::Goal), "الهدف الأول");
        assert_eq!(field(&slots, FieldKind::Summary), "ملخص الأداء");
        assert_eq!(field(&slots, FieldKind::Recommendations), "التوصيات النهائية");
        assert_eq!(field(&slots, FieldKind::Steps), "");
    }

    #[test]
    fn accepts_paren_and_dash_separators() {
        let raw = "1) الهدف\n2- الملخص";
        let slots = extract_fields(raw);
        assert_eq!(field(&slots, FieldKind::Goal), "الهدف");
        assert_eq!(field(&slots, FieldKind::Summary), "الملخص");
    }

    #[test]
    fn arabic_digit_requires_dot() {
        let raw = "١. الهدف\n٢) ليس فاصلاً معتمداً";
        let slots = extract_fields(raw);
        // The second line continues slot 1 instead of opening slot 2.
        assert_eq!(field(&slots, FieldKind::Goal), "الهدف ٢) ليس فاصلاً معتمداً");
        assert_eq!(field(&slots, FieldKind::Summary), "");
    }

    #[test]
    fn continuation_lines_join_with_single_spaces() {
        let raw = "1. الهدف من التقرير\nمتابعة مستوى الطالب\nخلال الفصل الدراسي\n2. الملخص";
        let slots = extract_fields(raw);
        assert_eq!(
            field(&slots, FieldKind::Goal),
            "الهدف من التقرير متابعة مستوى الطالب خلال الفصل الدراسي"
        );
        assert_eq!(field(&slots, FieldKind::Summary), "الملخص");
    }

    #[test]
    fn preamble_before_first_marker_is_discarded() {
        let raw = "فيما يلي التقرير المطلوب:\nبكل سرور\n1. الهدف";
        let slots = extract_fields(raw);
        assert_eq!(field(&slots, FieldKind::Goal), "الهدف");
        assert_eq!(slots.iter().filter(|s| !s.is_empty()).count(), 1);
    }

    #[test]
    fn digit_out_of_range_is_a_continuation() {
        let raw = "1. الهدف\n8. ليست فقرة جديدة\n9) ولا هذه";
        let slots = extract_fields(raw);
        assert_eq!(
            field(&slots, FieldKind::Goal),
            "الهدف 8. ليست فقرة جديدة 9) ولا هذه"
        );
    }

    #[test]
    fn digit_with_wrong_separator_is_a_continuation() {
        let raw = "1. الهدف\n2: نقطتان ليستا فاصلاً";
        let slots = extract_fields(raw);
        assert_eq!(field(&slots, FieldKind::Goal), "الهدف 2: نقطتان ليستا فاصلاً");
        assert_eq!(field(&slots, FieldKind::Summary), "");
    }

    #[test]
    fn marker_mid_line_does_not_open() {
        let raw = "1. الهدف يشمل 2. عناصر متعددة";
        let slots = extract_fields(raw);
        assert_eq!(field(&slots, FieldKind::Goal), "الهدف يشمل 2. عناصر متعددة");
        assert_eq!(field(&slots, FieldKind::Summary), "");
    }

    #[test]
    fn out_of_order_markers_land_in_their_slots() {
        let raw = "3. الخطوات\n1. الهدف\n7. التوصيات";
        let slots = extract_fields(raw);
        assert_eq!(field(&slots, FieldKind::Steps), "الخطوات");
        assert_eq!(field(&slots, FieldKind::Goal), "الهدف");
        assert_eq!(field(&slots, FieldKind::Recommendations), "التوصيات");
    }

    #[test]
    fn repeated_marker_overwrites() {
        let raw = "1. النسخة الأولى\n1. النسخة الثانية";
        let slots = extract_fields(raw);
        assert_eq!(field(&slots, FieldKind::Goal), "النسخة الثانية");
    }

    #[test]
    fn empty_input_yields_empty_slots() {
        let slots = extract_fields("");
        assert!(slots.iter().all(|s| s.is_empty()));
    }

    #[test]
    fn markerless_text_yields_empty_slots() {
        let slots = extract_fields("نص حر بدون أي ترقيم\nعلى عدة أسطر");
        assert!(slots.iter().all(|s| s.is_empty()));
    }

    #[test]
    fn bare_marker_leaves_slot_empty() {
        let raw = "1.\n2. الملخص";
        let slots = extract_fields(raw);
        assert_eq!(field(&slots, FieldKind::Goal), "");
        assert_eq!(field(&slots, FieldKind::Summary), "الملخص");
    }

    #[test]
    fn mixed_numeral_scripts_cooperate() {
        let raw = "1. الهدف\n٢. الملخص\n3) الخطوات";
        let slots = extract_fields(raw);
        assert_eq!(field(&slots, FieldKind::Goal), "الهدف");
        assert_eq!(field(&slots, FieldKind::Summary), "الملخص");
        assert_eq!(field(&slots, FieldKind::Steps), "الخطوات");
    }
}
