use super::*;

#[test]
fn reveals_one_char_per_interval() {
    let tw = Typewriter::new("Automação");
    assert_eq!(tw.frame_at(0).visible, "");
    assert!(tw.frame_at(0).caret);
    assert_eq!(tw.frame_at(49).visible, "");
    assert_eq!(tw.frame_at(50).visible, "A");
    assert_eq!(tw.frame_at(375).visible, "Automaç");
    assert!(tw.frame_at(375).caret);

    let done = tw.frame_at(tw.duration_ms());
    assert_eq!(done.visible, "Automação");
    assert!(!done.caret);
    assert_eq!(tw.frame_at(u64::MAX).visible, "Automação");
}

#[test]
fn waits_for_delay_without_caret() {
    let tw = Typewriter::new("ab").with_delay(300).with_speed(100);
    assert_eq!(
        tw.frame_at(299),
        TypewriterFrame {
            visible: "",
            caret: false
        }
    );
    assert!(tw.frame_at(300).caret);
    assert_eq!(tw.frame_at(400).visible, "a");
    assert_eq!(tw.duration_ms(), 500);
    assert!(!tw.frame_at(500).caret);
}

#[test]
fn zero_speed_and_empty_text() {
    assert_eq!(Typewriter::new("xyz").with_speed(0).frame_at(0).visible, "xyz");

    let empty = Typewriter::new("");
    assert_eq!(
        empty.frame_at(0),
        TypewriterFrame {
            visible: "",
            caret: false
        }
    );
}
