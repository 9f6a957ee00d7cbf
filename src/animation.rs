// src/animation.rs
//
// Interpreta el bloque de declaraciones de un nivel (transform, opacity,
// transition, animation) para mover la bola de la vista de salida.

use std::f32::consts::PI;

use crate::validator::normalize_value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

/// Parte `prop: valor; prop: valor;` en declaraciones. Las vacías se descartan.
pub fn parse_declarations(css: &str) -> Vec<Declaration> {
    css.split(';')
        .filter_map(|rule| {
            let (property, value) = rule.split_once(':')?;
            let property = property.trim().to_lowercase();
            let value = value.trim();
            if property.is_empty() || value.is_empty() {
                None
            } else {
                Some(Declaration {
                    property,
                    value: value.to_string(),
                })
            }
        })
        .collect()
}

/// Posición visible de la bola respecto a su sitio de reposo.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub dx: f32,
    pub dy: f32,
    pub rotation: f32, // grados, sentido horario
    pub scale: f32,
    pub opacity: f32,
}

impl Pose {
    pub const IDENTITY: Pose = Pose::new(0.0, 0.0, 0.0, 1.0, 1.0);

    pub const fn new(dx: f32, dy: f32, rotation: f32, scale: f32, opacity: f32) -> Self {
        Self {
            dx,
            dy,
            rotation,
            scale,
            opacity,
        }
    }

    pub fn lerp(self, to: Pose, t: f32) -> Pose {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Pose {
            dx: mix(self.dx, to.dx),
            dy: mix(self.dy, to.dy),
            rotation: mix(self.rotation, to.rotation),
            scale: mix(self.scale, to.scale),
            opacity: mix(self.opacity, to.opacity),
        }
    }

    /// Superpone una animación encima de esta pose.
    pub fn layer(self, top: Pose) -> Pose {
        Pose {
            dx: self.dx + top.dx,
            dy: self.dy + top.dy,
            rotation: self.rotation + top.rotation,
            scale: self.scale * top.scale,
            opacity: (self.opacity * top.opacity).clamp(0.0, 1.0),
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Pose::IDENTITY
    }
}

/// Matriz afín 2D en el orden de CSS: `[a c e; b d f]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn translate(x: f32, y: f32) -> Self {
        Affine {
            e: x,
            f: y,
            ..Self::IDENTITY
        }
    }

    fn rotate(deg: f32) -> Self {
        let (sin, cos) = deg.to_radians().sin_cos();
        Affine {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    fn scale(x: f32, y: f32) -> Self {
        Affine {
            a: x,
            d: y,
            ..Self::IDENTITY
        }
    }

    /// `self` seguida de `next` en la lista de CSS (next se aplica primero al elemento).
    fn then(self, next: Affine) -> Affine {
        Affine {
            a: self.a * next.a + self.c * next.b,
            b: self.b * next.a + self.d * next.b,
            c: self.a * next.c + self.c * next.d,
            d: self.b * next.c + self.d * next.d,
            e: self.a * next.e + self.c * next.f + self.e,
            f: self.b * next.e + self.d * next.f + self.f,
        }
    }

    pub fn to_pose(self) -> Pose {
        let det = self.a * self.d - self.b * self.c;
        Pose {
            dx: self.e,
            dy: self.f,
            rotation: self.b.atan2(self.a).to_degrees(),
            scale: det.abs().sqrt(),
            opacity: 1.0,
        }
    }
}

/// Compone la lista de funciones de `transform` de izquierda a derecha.
pub fn parse_transform(value: &str) -> Affine {
    let normalized = normalize_value(value);
    let mut rest = normalized.as_str();
    let mut matrix = Affine::IDENTITY;

    while let Some(open) = rest.find('(') {
        let Some(close) = rest[open..].find(')').map(|i| open + i) else {
            break;
        };
        let name = rest[..open].trim();
        let args: Vec<&str> = rest[open + 1..close]
            .split([',', ' '])
            .filter(|a| !a.is_empty())
            .collect();

        match transform_function(name, &args) {
            Some(step) => matrix = matrix.then(step),
            None => log::debug!("Ignoring transform function {name}({})", args.join(",")),
        }
        rest = &rest[close + 1..];
    }
    matrix
}

fn transform_function(name: &str, args: &[&str]) -> Option<Affine> {
    let first = args.first().copied();
    let second = args.get(1).copied();
    match name {
        "translatex" => Some(Affine::translate(parse_length(first?)?, 0.0)),
        "translatey" => Some(Affine::translate(0.0, parse_length(first?)?)),
        "translate" => {
            let x = parse_length(first?)?;
            let y = second.map(parse_length).unwrap_or(Some(0.0))?;
            Some(Affine::translate(x, y))
        }
        "rotate" => Some(Affine::rotate(parse_angle(first?)?)),
        "scale" => {
            let x = first?.parse::<f32>().ok()?;
            let y = second.map(|s| s.parse::<f32>().ok()).unwrap_or(Some(x))?;
            Some(Affine::scale(x, y))
        }
        "scalex" => Some(Affine::scale(first?.parse().ok()?, 1.0)),
        "scaley" => Some(Affine::scale(1.0, first?.parse().ok()?)),
        _ => None,
    }
}

fn parse_length(token: &str) -> Option<f32> {
    token.strip_suffix("px").unwrap_or(token).parse().ok()
}

fn parse_angle(token: &str) -> Option<f32> {
    if let Some(v) = token.strip_suffix("deg") {
        v.parse().ok()
    } else if let Some(v) = token.strip_suffix("grad") {
        v.parse::<f32>().ok().map(|g| g * 0.9)
    } else if let Some(v) = token.strip_suffix("rad") {
        v.parse::<f32>().ok().map(|r| r * 180.0 / PI)
    } else if let Some(v) = token.strip_suffix("turn") {
        v.parse::<f32>().ok().map(|t| t * 360.0)
    } else {
        token.parse().ok()
    }
}

/// Tiempo CSS en segundos (`2s`, `500ms`).
fn parse_time(token: &str) -> Option<f32> {
    if let Some(v) = token.strip_suffix("ms") {
        v.parse::<f32>().ok().map(|ms| ms / 1000.0)
    } else {
        token.strip_suffix('s')?.parse().ok()
    }
}

/// Separa por `sep` fuera de paréntesis (para `cubic-bezier(a,b,c,d)`).
fn split_top_level(value: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in value.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                parts.push(&value[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&value[start..]);
    parts.into_iter().map(str::trim).filter(|p| !p.is_empty()).collect()
}

/// Tokens de un shorthand separados por espacios; lo que va entre paréntesis
/// queda en un solo token aunque lleve espacios.
fn shorthand_tokens(value: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    for c in value.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
                if depth == 0 {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c if c.is_whitespace() => {
                if depth == 0 && !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimingFunction {
    Linear,
    CubicBezier(f32, f32, f32, f32),
    Steps(u32),
}

impl TimingFunction {
    pub const EASE: TimingFunction = TimingFunction::CubicBezier(0.25, 0.1, 0.25, 1.0);

    pub fn from_token(token: &str) -> Option<Self> {
        let timing = match token {
            "linear" => TimingFunction::Linear,
            "ease" => Self::EASE,
            "ease-in" => TimingFunction::CubicBezier(0.42, 0.0, 1.0, 1.0),
            "ease-out" => TimingFunction::CubicBezier(0.0, 0.0, 0.58, 1.0),
            "ease-in-out" => TimingFunction::CubicBezier(0.42, 0.0, 0.58, 1.0),
            "step-end" => TimingFunction::Steps(1),
            _ => {
                let args = token.strip_suffix(')')?;
                if let Some(args) = args.strip_prefix("cubic-bezier(") {
                    let v: Vec<f32> = args
                        .split(',')
                        .map(|a| a.trim().parse().ok())
                        .collect::<Option<_>>()?;
                    match v.as_slice() {
                        [x1, y1, x2, y2] => TimingFunction::CubicBezier(*x1, *y1, *x2, *y2),
                        _ => return None,
                    }
                } else if let Some(args) = args.strip_prefix("steps(") {
                    let count = args.split(',').next()?.trim().parse::<u32>().ok()?;
                    TimingFunction::Steps(count.max(1))
                } else {
                    return None;
                }
            }
        };
        Some(timing)
    }

    /// Progreso aplicado a `t` en `[0, 1]`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            TimingFunction::Linear => t,
            TimingFunction::Steps(n) => {
                let n = n as f32;
                ((t * n).floor() / n).min(1.0)
            }
            TimingFunction::CubicBezier(x1, y1, x2, y2) => {
                let bezier = |p1: f32, p2: f32, s: f32| {
                    let inv = 1.0 - s;
                    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
                };
                // x(s) es monótona para x1, x2 en [0, 1]: bisección
                let (mut lo, mut hi) = (0.0f32, 1.0f32);
                for _ in 0..24 {
                    let mid = (lo + hi) / 2.0;
                    if bezier(x1, x2, mid) < t {
                        lo = mid;
                    } else {
                        hi = mid;
                    }
                }
                bezier(y1, y2, (lo + hi) / 2.0)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub property: String,
    pub duration: f32,
    pub timing: TimingFunction,
    pub delay: f32,
}

impl Transition {
    fn parse(value: &str) -> Option<Self> {
        let mut transition = Transition {
            property: "all".into(),
            duration: 0.0,
            timing: TimingFunction::EASE,
            delay: 0.0,
        };
        let mut times = 0;
        for token in shorthand_tokens(value) {
            let token = token.as_str();
            if let Some(secs) = parse_time(token) {
                match times {
                    0 => transition.duration = secs,
                    _ => transition.delay = secs,
                }
                times += 1;
            } else if let Some(timing) = TimingFunction::from_token(token) {
                transition.timing = timing;
            } else {
                transition.property = token.to_string();
            }
        }
        (times > 0).then_some(transition)
    }

    pub fn applies_to(&self, property: &str) -> bool {
        self.property == "all" || self.property == property
    }

    fn progress(&self, elapsed: f32) -> f32 {
        let t = elapsed - self.delay;
        if t < 0.0 {
            0.0
        } else if self.duration <= 0.0 {
            1.0
        } else {
            self.timing.apply(t / self.duration)
        }
    }

    fn end(&self) -> f32 {
        self.delay + self.duration
    }
}

pub fn parse_transitions(value: &str) -> Vec<Transition> {
    let lowered = value.to_lowercase();
    split_top_level(&lowered, ',')
        .into_iter()
        .filter_map(Transition::parse)
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IterationCount {
    Finite(f32),
    Infinite,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayDirection {
    Normal,
    Reverse,
    Alternate,
    AlternateReverse,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnimationSpec {
    pub name: String,
    pub duration: f32,
    pub timing: TimingFunction,
    pub delay: f32,
    pub iterations: IterationCount,
    pub direction: PlayDirection,
}

impl AnimationSpec {
    /// Shorthand `animation`: el primer tiempo es la duración, el segundo el retardo.
    pub fn parse(value: &str) -> Option<Self> {
        let lowered = value.to_lowercase();
        let mut spec = AnimationSpec {
            name: String::new(),
            duration: 0.0,
            timing: TimingFunction::EASE,
            delay: 0.0,
            iterations: IterationCount::Finite(1.0),
            direction: PlayDirection::Normal,
        };
        let mut times = 0;

        // sólo la primera animación de la lista
        let first = split_top_level(&lowered, ',').into_iter().next()?;
        for token in shorthand_tokens(first) {
            let token = token.as_str();
            if let Some(secs) = parse_time(token) {
                match times {
                    0 => spec.duration = secs,
                    _ => spec.delay = secs,
                }
                times += 1;
                continue;
            }
            if let Some(timing) = TimingFunction::from_token(token) {
                spec.timing = timing;
                continue;
            }
            match token {
                "infinite" => spec.iterations = IterationCount::Infinite,
                "normal" => spec.direction = PlayDirection::Normal,
                "reverse" => spec.direction = PlayDirection::Reverse,
                "alternate" => spec.direction = PlayDirection::Alternate,
                "alternate-reverse" => spec.direction = PlayDirection::AlternateReverse,
                "none" | "forwards" | "backwards" | "both" | "running" | "paused" => {}
                _ => match token.parse::<f32>() {
                    Ok(n) => spec.iterations = IterationCount::Finite(n.max(0.0)),
                    Err(_) if spec.name.is_empty() => spec.name = token.to_string(),
                    Err(_) => log::debug!("Ignoring animation token {token}"),
                },
            }
        }

        (!spec.name.is_empty()).then_some(spec)
    }

    pub fn keyframes(&self) -> Option<&'static Keyframes> {
        find_keyframes(&self.name)
    }

    pub fn sample(&self, elapsed: f32) -> Pose {
        let Some(keyframes) = self.keyframes() else {
            return Pose::IDENTITY;
        };
        let t = elapsed - self.delay;
        if self.duration <= 0.0 || t < 0.0 {
            return Pose::IDENTITY;
        }

        let cycles = t / self.duration;
        if let IterationCount::Finite(n) = self.iterations {
            if cycles >= n {
                return Pose::IDENTITY;
            }
        }

        let iteration = cycles.floor();
        let odd = (iteration as u64) % 2 == 1;
        let reversed = match self.direction {
            PlayDirection::Normal => false,
            PlayDirection::Reverse => true,
            PlayDirection::Alternate => odd,
            PlayDirection::AlternateReverse => !odd,
        };
        let mut progress = cycles - iteration;
        if reversed {
            progress = 1.0 - progress;
        }
        keyframes.sample(progress, self.timing)
    }

    fn is_running(&self, elapsed: f32) -> bool {
        match self.iterations {
            IterationCount::Infinite => true,
            IterationCount::Finite(n) => elapsed < self.delay + self.duration * n,
        }
    }
}

pub struct Keyframes {
    pub name: &'static str,
    pub frames: &'static [(f32, Pose)],
}

impl Keyframes {
    /// Interpola entre los fotogramas; la función de tiempo se aplica por tramo.
    pub fn sample(&self, progress: f32, timing: TimingFunction) -> Pose {
        let p = progress.clamp(0.0, 1.0);
        for pair in self.frames.windows(2) {
            let (o0, from) = pair[0];
            let (o1, to) = pair[1];
            if p <= o1 {
                let local = if o1 > o0 { (p - o0) / (o1 - o0) } else { 1.0 };
                return from.lerp(to, timing.apply(local));
            }
        }
        self.frames.last().map(|(_, pose)| *pose).unwrap_or_default()
    }

    pub fn to_css(&self) -> String {
        let mut css = format!("@keyframes {} {{\n", self.name);
        for (offset, pose) in self.frames {
            css.push_str(&format!(
                "  {}% {{ transform: translate({}px, {}px) rotate({}deg) scale({}); opacity: {}; }}\n",
                (offset * 100.0).round() as u32,
                pose.dx,
                pose.dy,
                pose.rotation,
                pose.scale,
                pose.opacity
            ));
        }
        css.push('}');
        css
    }
}

const fn at(offset: f32, pose: Pose) -> (f32, Pose) {
    (offset, pose)
}

pub const KEYFRAMES: &[Keyframes] = &[
    Keyframes {
        name: "bounce",
        frames: &[
            at(0.0, Pose::IDENTITY),
            at(0.5, Pose::new(0.0, -80.0, 0.0, 1.0, 1.0)),
            at(1.0, Pose::IDENTITY),
        ],
    },
    Keyframes {
        name: "spin",
        frames: &[at(0.0, Pose::IDENTITY), at(1.0, Pose::new(0.0, 0.0, 360.0, 1.0, 1.0))],
    },
    Keyframes {
        name: "slide",
        frames: &[at(0.0, Pose::IDENTITY), at(1.0, Pose::new(200.0, 0.0, 0.0, 1.0, 1.0))],
    },
    Keyframes {
        name: "wobble",
        frames: &[
            at(0.0, Pose::IDENTITY),
            at(0.25, Pose::new(-10.0, 0.0, -15.0, 1.0, 1.0)),
            at(0.75, Pose::new(10.0, 0.0, 15.0, 1.0, 1.0)),
            at(1.0, Pose::IDENTITY),
        ],
    },
    Keyframes {
        name: "pulse",
        frames: &[
            at(0.0, Pose::IDENTITY),
            at(0.5, Pose::new(0.0, 0.0, 0.0, 1.3, 0.8)),
            at(1.0, Pose::IDENTITY),
        ],
    },
    Keyframes {
        name: "complex",
        frames: &[
            at(0.0, Pose::IDENTITY),
            at(0.5, Pose::new(80.0, -30.0, 180.0, 1.2, 0.6)),
            at(1.0, Pose::new(160.0, 0.0, 360.0, 1.0, 1.0)),
        ],
    },
    Keyframes {
        name: "master",
        frames: &[
            at(0.0, Pose::IDENTITY),
            at(0.5, Pose::new(0.0, -40.0, 90.0, 1.1, 1.0)),
            at(1.0, Pose::new(0.0, 0.0, 180.0, 1.0, 1.0)),
        ],
    },
];

pub fn keyframe_names() -> impl Iterator<Item = &'static str> {
    KEYFRAMES.iter().map(|k| k.name)
}

pub fn find_keyframes(name: &str) -> Option<&'static Keyframes> {
    let name = name.to_lowercase();
    KEYFRAMES.iter().find(|k| k.name == name)
}

pub fn is_valid_animation(name: &str) -> bool {
    find_keyframes(name).is_some()
}

/// Estilo de la bola tras aplicar el bloque de declaraciones de un nivel.
#[derive(Clone, Debug, PartialEq)]
pub struct BallStyle {
    pub transform: Affine,
    pub opacity: f32,
    pub transitions: Vec<Transition>,
    pub animation: Option<AnimationSpec>,
}

impl Default for BallStyle {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            opacity: 1.0,
            transitions: Vec::new(),
            animation: None,
        }
    }
}

impl BallStyle {
    pub fn from_css(css: &str) -> Self {
        let mut style = BallStyle::default();
        for decl in parse_declarations(css) {
            match decl.property.as_str() {
                "transform" => style.transform = parse_transform(&decl.value),
                "opacity" => match decl.value.parse::<f32>() {
                    Ok(v) => style.opacity = v.clamp(0.0, 1.0),
                    Err(_) => log::debug!("Ignoring opacity {}", decl.value),
                },
                "transition" => style.transitions = parse_transitions(&decl.value),
                "animation" => style.animation = AnimationSpec::parse(&decl.value),
                other => log::debug!("Ignoring property {other}"),
            }
        }
        style
    }

    /// Pose final sin transiciones ni animación.
    pub fn resting_pose(&self) -> Pose {
        Pose {
            opacity: self.opacity,
            ..self.transform.to_pose()
        }
    }

    // La última transición que cubre la propiedad gana, como en CSS.
    fn transition_progress(&self, property: &str, elapsed: f32) -> f32 {
        self.transitions
            .iter()
            .rev()
            .find(|t| t.applies_to(property))
            .map(|t| t.progress(elapsed))
            .unwrap_or(1.0)
    }

    /// Pose visible `elapsed` segundos después de aplicar el estilo.
    pub fn sample(&self, elapsed: f32) -> Pose {
        let target = self.resting_pose();
        let moved = Pose::IDENTITY.lerp(target, self.transition_progress("transform", elapsed));
        let faded = 1.0 + (target.opacity - 1.0) * self.transition_progress("opacity", elapsed);
        let base = Pose {
            opacity: faded,
            ..moved
        };

        match &self.animation {
            Some(animation) => base.layer(animation.sample(elapsed)),
            None => base,
        }
    }

    /// ¿Hace falta seguir repintando?
    pub fn is_animating(&self, elapsed: f32) -> bool {
        self.transitions.iter().any(|t| elapsed < t.end())
            || self.animation.as_ref().is_some_and(|a| a.keyframes().is_some() && a.is_running(elapsed))
    }

    pub fn animation_name(&self) -> Option<&str> {
        self.animation.as_ref().map(|a| a.name.as_str())
    }
}
