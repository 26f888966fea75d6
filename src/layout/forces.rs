//! Force kernels. Each one nudges velocities (or, for centering, positions) of the bodies
//! in place; integration happens in the simulation tick.

use super::simulation::Body;

/// Resolved link between two body indices.
#[derive(Clone, Debug)]
pub(crate) struct Link {
	pub source: usize,
	pub target: usize,
	pub strength: f64,
	/// Share of the correction applied to the target; the source takes the rest.
	pub bias: f64,
}

impl Link {
	/// Strength and bias derived from node degrees so hubs move less than leaves.
	pub fn weighted(source: usize, target: usize, weight: f64, degree: &[usize]) -> Self {
		let (ds, dt) = (degree[source] as f64, degree[target] as f64);
		Self {
			source,
			target,
			strength: weight / ds.min(dt).max(1.0),
			bias: ds / (ds + dt),
		}
	}
}

/// Deterministic tiny offset used to separate coincident points.
#[derive(Clone, Debug)]
pub(crate) struct Jiggle(u64);

impl Jiggle {
	pub fn new(seed: u64) -> Self {
		Self(seed | 1)
	}

	pub fn next(&mut self) -> f64 {
		self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
		((self.0 >> 11) as f64 / (1u64 << 53) as f64 - 0.5) * 1e-6
	}

	fn nonzero(&mut self, v: f64) -> f64 {
		if v == 0.0 { self.next() } else { v }
	}
}

pub(crate) fn link(bodies: &mut [Body], links: &[Link], distance: f64, alpha: f64, jiggle: &mut Jiggle) {
	for link in links {
		let (s, t) = (bodies[link.source], bodies[link.target]);
		let x = jiggle.nonzero(t.x + t.vx - s.x - s.vx);
		let y = jiggle.nonzero(t.y + t.vy - s.y - s.vy);
		let len = (x * x + y * y).sqrt();
		let k = (len - distance) / len * alpha * link.strength;
		let (x, y) = (x * k, y * k);

		let target = &mut bodies[link.target];
		target.vx -= x * link.bias;
		target.vy -= y * link.bias;
		let source = &mut bodies[link.source];
		source.vx += x * (1.0 - link.bias);
		source.vy += y * (1.0 - link.bias);
	}
}

/// Pairwise charge, `strength / distance` in magnitude. Distances under one unit are
/// clamped to avoid blow-ups.
pub(crate) fn many_body(bodies: &mut [Body], strength: f64, alpha: f64, jiggle: &mut Jiggle) {
	const DISTANCE_MIN2: f64 = 1.0;

	let positions: Vec<(f64, f64)> = bodies.iter().map(|b| (b.x, b.y)).collect();
	for (i, body) in bodies.iter_mut().enumerate() {
		for (j, &(ox, oy)) in positions.iter().enumerate() {
			if i == j {
				continue;
			}
			let (mut x, mut y) = (ox - positions[i].0, oy - positions[i].1);
			let mut l = x * x + y * y;
			if x == 0.0 {
				x = jiggle.next();
				l += x * x;
			}
			if y == 0.0 {
				y = jiggle.next();
				l += y * y;
			}
			if l < DISTANCE_MIN2 {
				l = (DISTANCE_MIN2 * l).sqrt();
			}
			let w = strength * alpha / l;
			body.vx += x * w;
			body.vy += y * w;
		}
	}
}

/// Translate every body so the centroid sits on `(cx, cy)`.
pub(crate) fn center(bodies: &mut [Body], cx: f64, cy: f64) {
	if bodies.is_empty() {
		return;
	}
	let n = bodies.len() as f64;
	let (sx, sy) = bodies
		.iter()
		.fold((0.0, 0.0), |(sx, sy), b| (sx + b.x, sy + b.y));
	let (dx, dy) = (sx / n - cx, sy / n - cy);
	for body in bodies {
		body.x -= dx;
		body.y -= dy;
	}
}

/// Independent spring toward the vertical and horizontal centre lines.
pub(crate) fn axis(bodies: &mut [Body], cx: f64, cy: f64, strength: f64, alpha: f64) {
	for body in bodies {
		body.vx += (cx - body.x) * strength * alpha;
		body.vy += (cy - body.y) * strength * alpha;
	}
}

/// Push overlapping circles apart so their centres end up at least `2 * radius` apart.
pub(crate) fn collide(bodies: &mut [Body], radius: f64, jiggle: &mut Jiggle) {
	let r = radius * 2.0;
	let n = bodies.len();
	for i in 0..n {
		let (xi, yi) = (bodies[i].x + bodies[i].vx, bodies[i].y + bodies[i].vy);
		for j in (i + 1)..n {
			let other = bodies[j];
			let mut x = xi - other.x - other.vx;
			let mut y = yi - other.y - other.vy;
			let mut l = x * x + y * y;
			if l >= r * r {
				continue;
			}
			if x == 0.0 {
				x = jiggle.next();
				l += x * x;
			}
			if y == 0.0 {
				y = jiggle.next();
				l += y * y;
			}
			let len = l.sqrt();
			let k = (r - len) / len;
			// Equal radii: each side takes half the correction.
			let (x, y) = (x * k * 0.5, y * k * 0.5);
			bodies[i].vx += x;
			bodies[i].vy += y;
			bodies[j].vx -= x;
			bodies[j].vy -= y;
		}
	}
}
