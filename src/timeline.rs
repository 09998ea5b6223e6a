use crate::placement::Instance;


/// Frame gaps longer than this are treated as a stall
pub const LAG_THRESHOLD: f32 = 0.5;
/// Playhead step taken for a stalled frame
pub const LAG_STEP: f32 = 0.033;


/// A stalled frame advances the playhead by one short step
pub fn smooth_lag(dt: f32) -> f32 {
    if dt > LAG_THRESHOLD {
        LAG_STEP
    } else {
        dt
    }
}


#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    #[cfg(test)]
    Linear,
    /// Cubic ease-in-out
    Power2InOut,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            #[cfg(test)]
            Ease::Linear => t,
            Ease::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) * 0.5
                }
            }
        }
    }
}


/// Something a tween can drive
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    Title,
    Subtitle(usize),
    /// The element holding the render canvas
    Surface,
    HomeLink,
    GitLink,
    Instance(Instance),
}


#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    /// CSS vertical translation in pixels
    TranslateY,
    Opacity,
    /// Scene-space y of a placed instance
    PositionY,
}


/// Reads and writes tweened values
pub trait TweenSink {
    fn read(&self, target: Target, property: Property) -> f32;
    fn write(&mut self, target: Target, property: Property, value: f32);
}


#[derive(Clone, Copy, Debug)]
pub struct TweenDefaults {
    pub duration: f32,
    pub ease: Ease,
}


#[derive(Clone, Copy, Debug)]
pub struct TweenVars {
    property: Property,
    to: f32,
    duration: Option<f32>,
    ease: Option<Ease>,
    stagger: f32,
}

impl TweenVars {
    pub fn to(property: Property, value: f32) -> Self {
        Self {
            property,
            to: value,
            duration: None,
            ease: None,
            stagger: 0.0,
        }
    }

    pub fn duration(mut self, seconds: f32) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }

    /// Delay between consecutive targets of the same call
    pub fn stagger(mut self, seconds: f32) -> Self {
        self.stagger = seconds;
        self
    }
}


#[derive(Clone, Debug)]
struct Tween {
    target: Target,
    property: Property,
    from: Option<f32>,
    to: f32,
    start: f32,
    duration: f32,
    ease: Ease,
    done: bool,
}

impl Tween {
    fn progress(&self, time: f32) -> f32 {
        if time >= self.start + self.duration {
            1.0
        } else {
            ((time - self.start) / self.duration).clamp(0.0, 1.0)
        }
    }
}


#[derive(Clone, Debug)]
pub struct Timeline {
    defaults: TweenDefaults,
    tweens: Vec<Tween>,
    time: f32,
    paused: bool,
}

impl Timeline {
    pub fn new(defaults: TweenDefaults) -> Self {
        Self {
            defaults,
            tweens: Vec::new(),
            time: 0.0,
            paused: true,
        }
    }

    /// Adds one tween per target starting at `position` seconds
    pub fn to(&mut self, targets: &[Target], vars: TweenVars, position: f32) -> &mut Self {
        let duration = vars.duration.unwrap_or(self.defaults.duration);
        let ease = vars.ease.unwrap_or(self.defaults.ease);
        for (i, target) in targets.iter().enumerate() {
            self.tweens.push(Tween {
                target: *target,
                property: vars.property,
                from: None,
                to: vars.to,
                start: position + vars.stagger * i as f32,
                duration,
                ease,
                done: false,
            });
        }
        self
    }

    pub fn play(&mut self) {
        self.paused = false;
    }

    #[cfg(test)]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// End time of the last tween
    pub fn duration(&self) -> f32 {
        self.tweens.iter()
            .map(|t| t.start + t.duration)
            .fold(0.0, f32::max)
    }

    pub fn is_complete(&self) -> bool {
        self.time >= self.duration()
    }

    /// Start offsets of every tween driving `target`
    #[cfg(test)]
    pub fn start_times(&self, target: Target) -> Vec<f32> {
        self.tweens.iter()
            .filter(|t| t.target == target)
            .map(|t| t.start)
            .collect()
    }

    /// Moves the playhead forward and writes every started tween
    pub fn advance<S: TweenSink>(&mut self, dt: f32, sink: &mut S) {
        if self.paused || self.is_complete() {
            return;
        }
        self.time = (self.time + dt.max(0.0)).min(self.duration());

        let time = self.time;
        for tween in self.tweens.iter_mut().filter(|t| !t.done && time >= t.start) {
            let from = *tween.from.get_or_insert_with(|| sink.read(tween.target, tween.property));
            let p = tween.progress(time);
            let value = from + (tween.to - from) * tween.ease.apply(p);
            sink.write(tween.target, tween.property, value);
            tween.done = p >= 1.0;
        }
    }
}
