use criterion::{Criterion, black_box, criterion_group, criterion_main};

use vm_vector::{
    ElementWidth, HostBackend, LaneOrder, NoNativeBackend, OpDesc, VecOp, VecRegFile, VecRegId,
    VectorReg, expand_3_with,
};

const REG_SIZE: usize = 64;

fn prepared_file() -> VecRegFile {
    let mut rf = VecRegFile::new(3, REG_SIZE, LaneOrder::Little);
    let pattern: Vec<u8> = (0..REG_SIZE as u8).map(|i| i.wrapping_mul(37)).collect();
    *rf.reg_mut(VecRegId(1)) = VectorReg::from_bytes(&pattern);
    *rf.reg_mut(VecRegId(2)) = VectorReg::from_bytes(&pattern);
    rf
}

fn bench_expand(c: &mut Criterion) {
    let desc = OpDesc::new(ElementWidth::B8, REG_SIZE, REG_SIZE).unwrap();
    let mut group = c.benchmark_group("expand_add_b8");

    group.bench_function("native_packed", |b| {
        let mut rf = prepared_file();
        b.iter(|| {
            expand_3_with(
                &mut rf,
                &HostBackend,
                black_box(desc),
                VecOp::Add,
                VecRegId(0),
                VecRegId(1),
                VecRegId(2),
            )
        })
    });

    group.bench_function("helper_loop", |b| {
        let mut rf = prepared_file();
        b.iter(|| {
            expand_3_with(
                &mut rf,
                &NoNativeBackend,
                black_box(desc),
                VecOp::Add,
                VecRegId(0),
                VecRegId(1),
                VecRegId(2),
            )
        })
    });

    group.finish();

    c.bench_function("expand_uqadd_b16", |b| {
        let desc = OpDesc::new(ElementWidth::B16, REG_SIZE, REG_SIZE).unwrap();
        let mut rf = prepared_file();
        b.iter(|| {
            expand_3_with(
                &mut rf,
                &HostBackend,
                black_box(desc),
                VecOp::UqAdd,
                VecRegId(0),
                VecRegId(1),
                VecRegId(2),
            )
        })
    });
}

criterion_group!(benches, bench_expand);
criterion_main!(benches);
