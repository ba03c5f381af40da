// Modular arithmetic on exact integers stored in f64.
// Algorithms from L'Ecuyer, P., Simard, R., Chen, E. J. and Kelton, W. D.,
// An Object-Oriented Random-Number Package with Many Long Streams and Substreams (2002).

/// 3x3 matrix of exact integers.
pub type Matrix = [[f64; 3]; 3];

/// 3-vector of exact integers.
pub type Vector = [f64; 3];

const TWO17: f64 = 131072.0;
const TWO53: f64 = 9007199254740992.0;

/// Identity matrix.
pub const IDENTITY: Matrix = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// Returns (a * s + c) mod m, exactly.
/// Requires |a| < 2^35, |c| < 2^35 and m < 2^35.
pub fn mult_mod_m(a: f64, s: f64, c: f64, m: f64) -> f64 {
    let mut a = a;
    let mut v = a * s + c;

    if v >= TWO53 || v <= -TWO53 {
        // The product is not exact: reduce the high part of a first.
        let a1 = (a / TWO17).trunc();
        a -= a1 * TWO17;
        v = a1 * s;
        v -= (v / m).trunc() * m;
        v = v * TWO17 + a * s + c;
    }

    v -= (v / m).trunc() * m;
    if v < 0.0 {
        v + m
    } else {
        v
    }
}

/// Returns a * s mod m.
pub fn mat_vec_mod_m(a: &Matrix, s: &Vector, m: f64) -> Vector {
    let mut x = [0.0; 3];
    for (xi, row) in x.iter_mut().zip(a.iter()) {
        *xi = mult_mod_m(row[0], s[0], 0.0, m);
        *xi = mult_mod_m(row[1], s[1], *xi, m);
        *xi = mult_mod_m(row[2], s[2], *xi, m);
    }
    x
}

/// Returns a * b mod m.
pub fn mat_mat_mod_m(a: &Matrix, b: &Matrix, m: f64) -> Matrix {
    let mut c = [[0.0; 3]; 3];
    for j in 0..3 {
        let column = [b[0][j], b[1][j], b[2][j]];
        let w = mat_vec_mod_m(a, &column, m);
        for i in 0..3 {
            c[i][j] = w[i];
        }
    }
    c
}

/// Returns a^(2^e) mod m.
pub fn mat_two_pow_mod_m(a: &Matrix, m: f64, e: u32) -> Matrix {
    let mut b = *a;
    for _ in 0..e {
        b = mat_mat_mod_m(&b, &b, m);
    }
    b
}

/// Returns a^n mod m.
pub fn mat_pow_mod_m(a: &Matrix, m: f64, n: u64) -> Matrix {
    let mut w = *a;
    let mut b = IDENTITY;
    let mut n = n;

    while n > 0 {
        if n & 1 == 1 {
            b = mat_mat_mod_m(&w, &b, m);
        }
        w = mat_mat_mod_m(&w, &w, m);
        n >>= 1;
    }
    b
}
