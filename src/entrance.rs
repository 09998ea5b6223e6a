use crate::placement::Instance;
use crate::timeline::*;


pub const TITLE_AT: f32 = 1.0;
pub const SUBTITLES_AT: f32 = 1.3;
pub const PRIMARY_AT: f32 = 0.5;
pub const SURFACE_AT: f32 = 0.0;
pub const CLONE_AT: f32 = 0.35;
pub const LINKS_AT: f32 = 1.6;


/// Builds the entrance timeline and starts it
pub fn build(subtitle_count: usize) -> Timeline {
    let mut tl = Timeline::new(TweenDefaults {
        duration: 0.6,
        ease: Ease::Power2InOut,
    });

    tl.to(
        &[Target::Title],
        TweenVars::to(Property::TranslateY, 0.0).duration(0.5).stagger(0.05),
        TITLE_AT,
    );

    let subtitles: Vec<Target> = (0..subtitle_count).map(Target::Subtitle).collect();
    tl.to(
        &subtitles,
        TweenVars::to(Property::TranslateY, 0.0).duration(0.2).stagger(0.03),
        SUBTITLES_AT,
    );

    tl.to(
        &[Target::Instance(Instance::Primary)],
        TweenVars::to(Property::PositionY, 0.0).duration(0.8),
        PRIMARY_AT,
    );
    tl.to(
        &[Target::Surface],
        TweenVars::to(Property::Opacity, 1.0).duration(0.8),
        SURFACE_AT,
    );
    tl.to(
        &[Target::Instance(Instance::Clone)],
        TweenVars::to(Property::PositionY, 0.0).duration(0.8),
        CLONE_AT,
    );
    tl.to(
        &[Target::HomeLink, Target::GitLink],
        TweenVars::to(Property::Opacity, 1.0).duration(0.8),
        LINKS_AT,
    );

    tl.play();
    tl
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::tests::MapSink;

    #[test]
    fn starts_playing_immediately() {
        let tl = build(3);
        assert!(!tl.is_paused());
        assert_eq!(tl.time(), 0.0);
    }

    #[test]
    fn text_and_links_wait_for_their_offsets() {
        let tl = build(4);
        assert_eq!(tl.start_times(Target::Title), vec![1.0]);
        for i in 0..4 {
            assert!(tl.start_times(Target::Subtitle(i))[0] >= 1.3);
        }
        assert_eq!(tl.start_times(Target::HomeLink), vec![1.6]);
        assert_eq!(tl.start_times(Target::GitLink), vec![1.6]);
        assert_eq!(tl.start_times(Target::Surface), vec![0.0]);
        assert_eq!(tl.start_times(Target::Instance(Instance::Clone)), vec![0.35]);
        assert_eq!(tl.start_times(Target::Instance(Instance::Primary)), vec![0.5]);
    }

    #[test]
    fn nothing_textual_moves_before_one_second() {
        let mut tl = build(2);
        let mut sink = MapSink::default();
        for _ in 0..59 {
            tl.advance(1.0 / 60.0, &mut sink);
        }
        assert!(tl.time() < 1.0);
        assert!(sink.writes.iter().all(|(target, _, _)| matches!(
            target,
            Target::Surface | Target::Instance(_)
        )));
    }

    #[test]
    fn ends_with_everything_at_rest() {
        let mut tl = build(2);
        let mut sink = MapSink::default();
        sink.values.insert((Target::Title, Property::TranslateY), 120.0);
        sink.values.insert((Target::Subtitle(1), Property::TranslateY), 40.0);
        sink.values.insert((Target::Instance(Instance::Clone), Property::PositionY), -4.0);
        sink.values.insert((Target::Instance(Instance::Primary), Property::PositionY), 5.0);

        while !tl.is_complete() {
            tl.advance(1.0 / 60.0, &mut sink);
        }

        assert_eq!(sink.get(Target::Title, Property::TranslateY), 0.0);
        assert_eq!(sink.get(Target::Subtitle(1), Property::TranslateY), 0.0);
        assert_eq!(sink.get(Target::Instance(Instance::Clone), Property::PositionY), 0.0);
        assert_eq!(sink.get(Target::Instance(Instance::Primary), Property::PositionY), 0.0);
        assert_eq!(sink.get(Target::Surface, Property::Opacity), 1.0);
        assert_eq!(sink.get(Target::HomeLink, Property::Opacity), 1.0);
        assert_eq!(sink.get(Target::GitLink, Property::Opacity), 1.0);
        assert!((tl.duration() - 2.4).abs() < 1e-6);
    }

    #[test]
    fn no_subtitles_is_fine() {
        let tl = build(0);
        assert!(tl.start_times(Target::Subtitle(0)).is_empty());
    }
}
