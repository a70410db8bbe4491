coupler::vst3!(gainpan::GainPan);
