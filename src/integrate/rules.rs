//! Symmetric Gauss rules on the reference tetrahedron, triangle and segment.
//!
//! Weights are normalized to sum to one, so mapping a rule onto a cell only
//! needs a multiplication by the cell measure. Tetrahedron and triangle
//! points are given in barycentric coordinates, segment points on `[0, 1]`.

use crate::math::Real;

type TetPoint = ([Real; 4], Real);
type TriPoint = ([Real; 3], Real);
type LinePoint = (Real, Real);

const TET_O1: [TetPoint; 1] = [([0.25, 0.25, 0.25, 0.25], 1.0)];

// Degree 2, 4 points.
const TET_O2: [TetPoint; 4] = {
    const A: Real = 0.585_410_196_624_968_5;
    const B: Real = 0.138_196_601_125_010_5;
    [
        ([A, B, B, B], 0.25),
        ([B, A, B, B], 0.25),
        ([B, B, A, B], 0.25),
        ([B, B, B, A], 0.25),
    ]
};

// Degree 3, 5 points, with one negative centroid weight.
const TET_O3: [TetPoint; 5] = {
    const A: Real = 0.5;
    const B: Real = 1.0 / 6.0;
    const WC: Real = -0.8;
    const W: Real = 0.45;
    [
        ([0.25, 0.25, 0.25, 0.25], WC),
        ([A, B, B, B], W),
        ([B, A, B, B], W),
        ([B, B, A, B], W),
        ([B, B, B, A], W),
    ]
};

// Keast degree 4, 11 points.
const TET_O4: [TetPoint; 11] = {
    const A: Real = 0.785_714_285_714_285_7;
    const B: Real = 0.071_428_571_428_571_43;
    const C: Real = 0.399_403_576_166_799_2;
    const D: Real = 0.100_596_423_833_200_8;
    const WC: Real = -0.078_933_333_333_333_33;
    const W1: Real = 0.045_733_333_333_333_33;
    const W2: Real = 0.149_333_333_333_333_3;
    [
        ([0.25, 0.25, 0.25, 0.25], WC),
        ([A, B, B, B], W1),
        ([B, A, B, B], W1),
        ([B, B, A, B], W1),
        ([B, B, B, A], W1),
        ([C, C, D, D], W2),
        ([C, D, C, D], W2),
        ([C, D, D, C], W2),
        ([D, C, C, D], W2),
        ([D, C, D, C], W2),
        ([D, D, C, C], W2),
    ]
};

// Keast degree 5, 15 points.
const TET_O5: [TetPoint; 15] = {
    const A1: Real = 0.724_086_765_841_831;
    const B1: Real = 0.091_971_078_052_723;
    const A2: Real = 0.040_619_116_511_110_2;
    const B2: Real = 0.319_793_627_829_629_9;
    const C: Real = 0.443_649_167_310_370_9;
    const D: Real = 0.056_350_832_689_629_1;
    const WC: Real = 0.181_702_068_582_535_1;
    const W1: Real = 0.036_160_714_285_714_28;
    const W2: Real = 0.069_871_494_516_173_8;
    const W3: Real = 0.065_694_849_368_318_7;
    [
        ([0.25, 0.25, 0.25, 0.25], WC),
        ([A1, B1, B1, B1], W1),
        ([B1, A1, B1, B1], W1),
        ([B1, B1, A1, B1], W1),
        ([B1, B1, B1, A1], W1),
        ([A2, B2, B2, B2], W2),
        ([B2, A2, B2, B2], W2),
        ([B2, B2, A2, B2], W2),
        ([B2, B2, B2, A2], W2),
        ([C, C, D, D], W3),
        ([C, D, C, D], W3),
        ([C, D, D, C], W3),
        ([D, C, C, D], W3),
        ([D, C, D, C], W3),
        ([D, D, C, C], W3),
    ]
};

const TRI_O1: [TriPoint; 1] = [([1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0], 1.0)];

// Degree 2, 3 points.
const TRI_O2: [TriPoint; 3] = {
    const A: Real = 2.0 / 3.0;
    const B: Real = 1.0 / 6.0;
    const W: Real = 1.0 / 3.0;
    [([A, B, B], W), ([B, A, B], W), ([B, B, A], W)]
};

// Degree 3, 4 points, with one negative centroid weight.
const TRI_O3: [TriPoint; 4] = {
    const A: Real = 0.6;
    const B: Real = 0.2;
    const WC: Real = -0.5625;
    const W: Real = 0.520_833_333_333_333_3;
    [
        ([1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0], WC),
        ([A, B, B], W),
        ([B, A, B], W),
        ([B, B, A], W),
    ]
};

// Dunavant degree 4, 6 points.
const TRI_O4: [TriPoint; 6] = {
    const A1: Real = 0.108_103_018_168_070;
    const B1: Real = 0.445_948_490_915_965;
    const A2: Real = 0.816_847_572_980_459;
    const B2: Real = 0.091_576_213_509_771;
    const W1: Real = 0.223_381_589_678_011;
    const W2: Real = 0.109_951_743_655_322;
    [
        ([A1, B1, B1], W1),
        ([B1, A1, B1], W1),
        ([B1, B1, A1], W1),
        ([A2, B2, B2], W2),
        ([B2, A2, B2], W2),
        ([B2, B2, A2], W2),
    ]
};

// Dunavant degree 5, 7 points.
const TRI_O5: [TriPoint; 7] = {
    const A1: Real = 0.059_715_871_789_770;
    const B1: Real = 0.470_142_064_105_115;
    const A2: Real = 0.797_426_985_353_087;
    const B2: Real = 0.101_286_507_323_456;
    const WC: Real = 0.225;
    const W1: Real = 0.132_394_152_788_506;
    const W2: Real = 0.125_939_180_544_827;
    [
        ([1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0], WC),
        ([A1, B1, B1], W1),
        ([B1, A1, B1], W1),
        ([B1, B1, A1], W1),
        ([A2, B2, B2], W2),
        ([B2, A2, B2], W2),
        ([B2, B2, A2], W2),
    ]
};

const LINE_O1: [LinePoint; 1] = [(0.5, 1.0)];

const LINE_O3: [LinePoint; 2] = {
    const D: Real = 0.288_675_134_594_812_9; // 1 / (2 sqrt(3))
    [(0.5 - D, 0.5), (0.5 + D, 0.5)]
};

const LINE_O5: [LinePoint; 3] = {
    const D: Real = 0.387_298_334_620_741_7; // sqrt(3/5) / 2
    const W0: Real = 4.0 / 9.0;
    const W1: Real = 5.0 / 18.0;
    [(0.5 - D, W1), (0.5, W0), (0.5 + D, W1)]
};

const LINE_O7: [LinePoint; 4] = {
    const D1: Real = 0.169_990_521_792_428_1;
    const D2: Real = 0.430_568_155_797_026_3;
    const W1: Real = 0.326_072_577_431_273_1;
    const W2: Real = 0.173_927_422_568_726_9;
    [
        (0.5 - D2, W2),
        (0.5 - D1, W1),
        (0.5 + D1, W1),
        (0.5 + D2, W2),
    ]
};

/// A tetrahedron rule exact for polynomials of degree `order`.
///
/// Orders above 5 return the degree-5 rule, the highest one tabulated here.
pub fn tet_rule(order: u32) -> &'static [TetPoint] {
    match order {
        0 | 1 => &TET_O1,
        2 => &TET_O2,
        3 => &TET_O3,
        4 => &TET_O4,
        _ => &TET_O5,
    }
}

/// A triangle rule exact for polynomials of degree `order`.
///
/// Orders above 5 return the degree-5 rule, the highest one tabulated here.
pub fn triangle_rule(order: u32) -> &'static [TriPoint] {
    match order {
        0 | 1 => &TRI_O1,
        2 => &TRI_O2,
        3 => &TRI_O3,
        4 => &TRI_O4,
        _ => &TRI_O5,
    }
}

/// A Gauss-Legendre rule on `[0, 1]` exact for polynomials of degree `order`.
///
/// Orders above 7 return the degree-7 rule, the highest one tabulated here.
pub fn line_rule(order: u32) -> &'static [LinePoint] {
    match order {
        0 | 1 => &LINE_O1,
        2 | 3 => &LINE_O3,
        4 | 5 => &LINE_O5,
        _ => &LINE_O7,
    }
}
